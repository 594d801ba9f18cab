use sqlforge_core::{delete, insert, op, select, update, Ansi, Firebird, Mssql, SqlStatement};

fn main() -> sqlforge_core::Result<()> {
    // SELECT with grouped predicates
    let mut query = select(Ansi);
    query.from("users")?;
    query.column("id").column("name").column("email");
    query.where_block("(")?;
    query.where_(("age", op::GT, 18))?; // using op constants
    query.or_where(("role", "admin"))?; // explicit OR
    query.where_block(")")?;
    query.and_where(("active", true))?; // defaults back to AND
    query.order_by_desc("created_at");
    query.limit(10)?.offset(20)?;

    println!("ANSI SELECT:     {}", query.to_sql(true)?);

    // The same build calls against a TOP-based dialect
    let mut query = select(Mssql);
    query.from("users")?;
    query.where_(("city", "LIKE", "%York%"))?; // string operators
    query.limit(10)?;

    println!("MS SQL SELECT:   {}", query.to_sql(true)?);

    // Firebird paginates with FIRST/SKIP
    let mut query = select(Firebird);
    query.from("users")?;
    query.limit(10)?.offset(20)?;

    println!("Firebird SELECT: {}", query.to_sql(true)?);

    // UPDATE with last-write-wins assignments
    let mut query = update(Ansi);
    query.table("users")?;
    query.set("email", "new@example.com");
    query.set("login_count", 0);
    query.where_(("id", 123))?;

    println!("UPDATE:          {}", query.to_sql(true)?);

    // DELETE with a BETWEEN shape-checked value
    let mut query = delete(Ansi);
    query.from("sessions")?;
    query.where_(("created_at", op::BETWEEN, vec!["2020-01-01", "2020-12-31"]))?;

    println!("DELETE:          {}", query.to_sql(true)?);

    // INSERT
    let mut query = insert(Ansi);
    query.table("users")?;
    query.column("name", "John Doe");
    query.column("email", "john@example.com");
    query.column("age", 30);

    println!("INSERT:          {}", query.to_sql(true)?);

    Ok(())
}
