use kubedoc::analyzer::manifest::fields::{CronField, validate_cron_schedule};
use proptest::prelude::*;

fn render(fields: &[String; 5]) -> String {
    fields.join(" ")
}

proptest! {
    #[test]
    fn wildcard_is_valid_in_every_position(
        minute in 0u32..60,
        hour in 0u32..24,
        day in 1u32..32,
        month in 1u32..13,
        weekday in 0u32..8,
        star in 0usize..5,
    ) {
        let mut fields = [
            minute.to_string(),
            hour.to_string(),
            day.to_string(),
            month.to_string(),
            weekday.to_string(),
        ];
        fields[star] = "*".to_string();
        prop_assert!(validate_cron_schedule(&render(&fields)).is_ok());
    }

    #[test]
    fn out_of_range_minute_is_rejected(minute in 60u32..1000) {
        let schedule = format!("{} * * * *", minute);
        prop_assert!(validate_cron_schedule(&schedule).is_err());
    }

    #[test]
    fn steps_over_wildcards_are_valid(step in 1u32..60) {
        let schedule = format!("*/{} * * * *", step);
        prop_assert!(validate_cron_schedule(&schedule).is_ok());
    }
}

#[test]
fn boundary_schedules() {
    assert!(validate_cron_schedule("0 0 1 1 0").is_ok());
    assert!(validate_cron_schedule("59 23 31 12 6").is_ok());
    assert!(validate_cron_schedule("* * * * 7").is_ok());
    assert!(validate_cron_schedule("* * * * 8").is_err());
    assert!(validate_cron_schedule("* * 0 * *").is_err());
    assert!(validate_cron_schedule("* * * 13 *").is_err());
    assert!(validate_cron_schedule("* * * *").is_err());
}

#[test]
fn every_field_has_bounds() {
    for field in CronField::ALL {
        let (low, high) = field.bounds();
        assert!(low < high, "{field}");
    }
}
