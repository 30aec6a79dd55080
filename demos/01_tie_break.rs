/// several leases in force for the same tenant and property
use rent_reconciliation_rs::chrono::{NaiveDate, TimeZone, Utc};
use rent_reconciliation_rs::{
    ContractMatcher, ContractRecord, Money, PaymentRecord, TieBreak,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let payment = PaymentRecord::new(
        "Lucas Martin",
        "T2 Croix-Rousse",
        Money::from_major(780),
        NaiveDate::from_ymd_opt(2025, 9, 1).ok_or("invalid date")?,
    );

    let original = Utc.with_ymd_and_hms(2022, 9, 1, 0, 0, 0).single().ok_or("invalid date")?;
    let renewal = Utc.with_ymd_and_hms(2025, 8, 20, 0, 0, 0).single().ok_or("invalid date")?;
    let contracts = vec![
        ContractRecord::new("bail-2022", "Lucas Martin", "T2 Croix-Rousse", 760_i64, "Active")
            .signed_at(original),
        ContractRecord::new("bail-2025", "Lucas Martin", "T2 Croix-Rousse", "795 €", "Signed")
            .signed_at(renewal),
    ];

    for tie_break in [TieBreak::FirstInList, TieBreak::MostRecentlySigned] {
        let matcher = ContractMatcher::new(tie_break);
        let chosen = matcher.find(&payment, &contracts).map(|c| c.id.as_str());
        println!(
            "{:?}: {} candidates, chose {:?}",
            tie_break,
            matcher.find_all(&payment, &contracts).len(),
            chosen
        );
    }
    Ok(())
}
