/// full pipeline - reconcile, compose and render a receipt
use rent_reconciliation_rs::chrono::NaiveDate;
use rent_reconciliation_rs::{
    format_currency, ContractRecord, EventStore, JsonRenderer, Money, PaymentRecord, Reconciler,
    ReceiptEmitter, ReconciliationConfig, SafeTimeProvider, Severity, TenantDetails, TenantType,
    TimeSource,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let time = SafeTimeProvider::new(TimeSource::System);
    let mut config = ReconciliationConfig::french_residential();
    config.receipt.extension = "json".to_string();
    let reconciler = Reconciler::new(config)?;

    let mut payment = PaymentRecord::new(
        "Camille Roux",
        "Appartement Bellecour",
        Money::from_major(1_150),
        NaiveDate::from_ymd_opt(2025, 3, 1).ok_or("invalid date")?,
    );
    payment.paid_amount = Some(Money::from_major(1_230));

    let contracts = vec![ContractRecord::new(
        "bail-bellecour",
        "Camille Roux",
        "Appartement Bellecour",
        "1 150 €",
        "Active",
    )];

    let mut events = EventStore::new();
    let reconciliation = reconciler.reconcile_with_charges(
        &payment,
        &contracts,
        Money::from_major(80),
        &time,
        &mut events,
    );
    if reconciliation.severity == Severity::NoActiveContract {
        println!("no active contract found, using last recorded amount");
    }

    let format = &reconciler.config().amount_format;
    println!(
        "total {} / deposit {}",
        format_currency(reconciliation.rent.total_rent, format),
        format_currency(reconciliation.rent.security_deposit, format)
    );

    let emitter = ReceiptEmitter::new(JsonRenderer, reconciler.config().receipt.clone());
    match reconciler
        .issue_receipt(
            &emitter,
            TenantDetails::new("Camille Roux", TenantType::Tenant, "camille.roux@example.fr"),
            "Appartement Bellecour, 2 place Bellecour, Lyon",
            reconciliation.payment_data(
                "Mars 2025",
                NaiveDate::from_ymd_opt(2025, 3, 3).ok_or("invalid date")?,
                "Virement",
            ),
            &time,
            &mut events,
        )
        .await
    {
        Ok(issued) => {
            println!("{} ({} bytes)", issued.document.file_name, issued.document.bytes.len());
        }
        Err(err) if err.is_retryable() => {
            println!("receipt generation failed, please retry: {}", err);
        }
        Err(err) => return Err(err.into()),
    }

    for event in events.take_events() {
        println!("{:?}", event);
    }
    Ok(())
}
