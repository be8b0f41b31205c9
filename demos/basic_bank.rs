//! Basic bank usage example

use bank_core::utils::MemorySink;
use bank_core::{BankCore, Period};
use bigdecimal::BigDecimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏦 Bank Core - Basic Usage Example\n");

    // Create a new bank with an in-memory persistence sink
    let sink = MemorySink::new();
    let bank = BankCore::new(sink.clone());

    // 1. Create users and accounts
    println!("👤 Creating users and accounts...");
    bank.create_user("alice").await?;
    bank.create_user("bob").await?;
    bank.create_account(
        "alice",
        "savings",
        BigDecimal::from(100),
        BigDecimal::from(10),
        "1111",
    )
    .await?;
    bank.create_account("bob", "checking", BigDecimal::from(0), BigDecimal::from(5), "2222")
        .await?;
    println!("  ✓ alice/savings opened with 100 at 10%");
    println!("  ✓ bob/checking opened with 0 at 5%\n");

    // 2. Everyday operations
    println!("💰 Running operations...\n");

    let balance = bank.deposit("alice", "savings", BigDecimal::from(50)).await?;
    println!("  ✓ Deposit of 50 → alice/savings balance: {}", balance);

    let balance = bank
        .withdraw("alice", "savings", "1111", BigDecimal::from(30))
        .await?;
    println!("  ✓ Withdrawal of 30 → alice/savings balance: {}", balance);

    // PIN-gated: a wrong PIN changes nothing
    if let Err(err) = bank
        .withdraw("alice", "savings", "0000", BigDecimal::from(30))
        .await
    {
        println!("  ✗ Withdrawal with wrong PIN rejected: {}", err);
    }

    // 3. Transfer between users (source PIN only)
    bank.transfer("alice", "savings", "1111", "bob", "checking", BigDecimal::from(40))
        .await?;
    println!("  ✓ Transferred 40 from alice/savings to bob/checking");

    // 4. Monthly interest, idempotent per period
    let period = Period::new(2025, 6);
    let credited = bank.apply_interest("alice", "savings", period).await?;
    println!("  ✓ Interest for {}: {}", period, credited);
    let credited = bank.apply_interest("alice", "savings", period).await?;
    println!("  ✓ Interest for {} again (no-op): {}", period, credited);

    // 5. Reporting
    println!("\n📊 Account summaries:");
    for user in ["alice", "bob"] {
        for summary in bank.list_accounts_summary(user).await? {
            println!(
                "  {} / {} — balance {}, rate {}%",
                user, summary.account, summary.balance, summary.interest_rate_percent
            );
        }
    }

    println!("\n📜 alice/savings history:");
    for entry in bank.get_history("alice", "savings", "1111").await? {
        println!(
            "  {:?} of {} → balance {} at {}",
            entry.kind, entry.amount, entry.balance_after, entry.timestamp
        );
    }

    println!("\n💾 Snapshots recorded by the persistence sink: {}", sink.log().len());

    Ok(())
}
