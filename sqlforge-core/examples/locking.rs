use sqlforge_core::{lock, Connection, Firebird, Result};

// Mock connection for demonstration (replace with SqlxConnection in production)
struct PrintingConnection;

impl Connection for PrintingConnection {
    async fn begin_transaction(&mut self) -> Result<()> {
        println!("   BEGIN");
        Ok(())
    }

    async fn execute(&mut self, sql: &str) -> Result<u64> {
        println!("   EXECUTE: {sql}");
        Ok(1)
    }

    async fn commit(&mut self) -> Result<()> {
        println!("   COMMIT");
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        println!("   ROLLBACK");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut locks = lock(Firebird, PrintingConnection);

    println!("Acquiring row locks:");
    locks.add("accounts", &[])?;
    locks.add("orders", &[])?;
    locks.acquire().await?;

    // ... perform the guarded work here ...

    println!("Releasing:");
    locks.release("COMMIT").await?;

    println!("Acquire again, then roll back:");
    locks.add("accounts", &[])?;
    locks.acquire().await?;
    locks.release("ROLLBACK").await?;

    Ok(())
}
