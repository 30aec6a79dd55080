/// quick start - reconcile one payment against its lease
use rent_reconciliation_rs::chrono::NaiveDate;
use rent_reconciliation_rs::{
    ContractRecord, EventStore, Money, PaymentRecord, Reconciler, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    // payment recorded by the billing workflow
    let payment = PaymentRecord::new(
        "Marie Dubois",
        "Studio Centre-ville",
        Money::from_major(600),
        NaiveDate::from_ymd_opt(2025, 3, 5).ok_or("invalid date")?,
    );

    // lease stored with a formatted amount
    let contracts = vec![ContractRecord::new(
        "bail-001",
        "Marie Dubois",
        "Studio Centre-ville",
        "650€",
        "Signed",
    )];

    let mut events = EventStore::new();
    let result = Reconciler::default().reconcile(&payment, &contracts, &time, &mut events);

    println!("{}", serde_json::to_string_pretty(&result)?);
    println!("{} events", events.len());
    Ok(())
}
