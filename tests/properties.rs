use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use kakeibo::models::{Amount, ExpenseRecord, ParticipantSet, SettlementPeriodConfig, EPSILON};
use kakeibo::reports::aggregate;
use kakeibo::services::{compute_balances, plan_settlements, resolve_period};

const CATEGORIES: [&str; 4] = ["Food", "Household", "Laundry", "Utilities"];

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
}

fn participants(count: usize) -> ParticipantSet {
    ParticipantSet::new((0..count).map(|i| format!("P{i}"))).unwrap()
}

fn period_config() -> impl Strategy<Value = SettlementPeriodConfig> {
    prop_oneof![
        Just(SettlementPeriodConfig::calendar_month()),
        (1u32..=28).prop_map(|day| SettlementPeriodConfig::custom(day).unwrap()),
    ]
}

fn date() -> impl Strategy<Value = NaiveDate> {
    (0u64..36_500).prop_map(|offset| base_date() + Days::new(offset))
}

/// Participant count plus records paid by members of that set
fn ledger() -> impl Strategy<Value = (usize, Vec<ExpenseRecord>)> {
    (1usize..=6).prop_flat_map(|count| {
        let record = (0..count, 1u32..10_000_000, date(), 0..CATEGORIES.len()).prop_map(
            |(payer, cents, date, category)| {
                ExpenseRecord::new(
                    date,
                    format!("P{payer}"),
                    Amount::new(f64::from(cents) / 100.0),
                    CATEGORIES[category],
                )
            },
        );
        (Just(count), prop::collection::vec(record, 0..40))
    })
}

proptest! {
    #[test]
    fn balances_sum_to_zero((count, records) in ledger()) {
        let balances = compute_balances(&records, &participants(count)).unwrap();

        prop_assert_eq!(balances.entries.len(), count);
        prop_assert!(balances.sum().value().abs() <= count as f64 * EPSILON);
    }

    #[test]
    fn settlement_zeroes_every_balance((count, records) in ledger()) {
        let set = participants(count);
        let balances = compute_balances(&records, &set).unwrap();
        let transfers = plan_settlements(&balances, &set);

        let mut remaining: Vec<f64> = set.iter().map(|p| balances.get(p).value()).collect();
        for transfer in &transfers {
            prop_assert!(transfer.amount.is_positive());
            prop_assert_ne!(&transfer.from, &transfer.to);

            let from = set.iter().position(|p| p == transfer.from).unwrap();
            let to = set.iter().position(|p| p == transfer.to).unwrap();
            prop_assert!(balances.get(&transfer.from).is_negative());
            prop_assert!(balances.get(&transfer.to).is_positive());

            remaining[from] += transfer.amount.value();
            remaining[to] -= transfer.amount.value();
        }

        let tolerance = balances.residue_tolerance();
        for value in remaining {
            prop_assert!(value.abs() <= tolerance, "residual {} above {}", value, tolerance);
        }
    }

    #[test]
    fn even_spending_needs_no_settlement(
        count in 1usize..=6,
        cents in 1u32..10_000_000,
        repeats in 1usize..4,
        date in date(),
    ) {
        let records: Vec<ExpenseRecord> = (0..count)
            .flat_map(|p| {
                (0..repeats).map(move |_| {
                    ExpenseRecord::new(date, format!("P{p}"), Amount::new(f64::from(cents) / 100.0), "Food")
                })
            })
            .collect();

        let set = participants(count);
        let balances = compute_balances(&records, &set).unwrap();
        prop_assert!(balances.is_settled());
        prop_assert!(plan_settlements(&balances, &set).is_empty());
    }

    #[test]
    fn period_contains_reference_date(date in date(), config in period_config()) {
        let period = resolve_period(date, &config);

        prop_assert!(period.start <= date && date <= period.end);
        prop_assert!((28..=31).contains(&period.days()), "{} spans {} days", period, period.days());

        // Both bounds resolve back to the same period
        prop_assert_eq!(resolve_period(period.start, &config), period);
        prop_assert_eq!(resolve_period(period.end, &config), period);
    }

    #[test]
    fn periods_tile_the_calendar(date in date(), config in period_config()) {
        let period = resolve_period(date, &config);
        let next = resolve_period(period.end + Days::new(1), &config);

        prop_assert_eq!(next.start, period.end + Days::new(1));
        prop_assert!(period.key() < next.key());
    }

    #[test]
    fn aggregation_conserves_totals((_, records) in ledger(), config in period_config()) {
        let analysis = aggregate(&records, &config);

        let grand_total: f64 = records.iter().map(|r| r.amount.value()).sum();
        let period_total: f64 = analysis.iter().map(|p| p.total_amount.value()).sum();
        prop_assert!((grand_total - period_total).abs() <= 1e-6 * grand_total.max(1.0));

        let counted: usize = analysis.iter().map(|p| p.record_count).sum();
        prop_assert_eq!(counted, records.len());

        for period in &analysis {
            let by_category: f64 = period.category_totals.values().map(|a| a.value()).sum();
            let by_payer: f64 = period.participant_totals.values().map(|a| a.value()).sum();
            let total = period.total_amount.value();
            prop_assert!((by_category - total).abs() <= 1e-6 * total.max(1.0));
            prop_assert!((by_payer - total).abs() <= 1e-6 * total.max(1.0));
        }

        for pair in analysis.windows(2) {
            prop_assert!(pair[0].period_key > pair[1].period_key);
        }
    }
}
