use chrono::NaiveDate;
use myeongri::lunar::UnavailableLunarCalendar;
use myeongri::saju::{
    CompatibilityFactor, EarthlyBranch, Element, Gender, LuckDirection, SexagenaryCalendar,
    StemPosition, TenGod,
};
use myeongri::{Kernel, KernelConfig, KernelError, SajuRequest};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_full_chart_1990_05_15() {
    let kernel = Kernel::with_defaults();
    let request = SajuRequest::solar(1990, 5, 15).at(10, 0).in_location("seoul");
    let chart = kernel.compute_saju_chart(&request).unwrap();

    assert_eq!(chart.year.korean(), "경오");
    assert_eq!(chart.month.korean(), "신사");
    assert_eq!(chart.day.korean(), "경진");
    assert_eq!(chart.hour.unwrap().korean(), "신사");
    assert_eq!(chart.sexagenary_year, 1990);
    assert_eq!(chart.sexagenary_month, 4);
    assert_eq!(chart.zodiac_animal, "말");
    assert!(chart.lunar_date.available);
    assert_eq!(
        (chart.lunar_date.month, chart.lunar_date.day, chart.lunar_date.is_leap_month),
        (4, 21, false)
    );
}

#[test]
fn test_element_balance_counts_stems_and_branches() {
    let kernel = Kernel::with_defaults();
    let chart = kernel
        .compute_saju_chart(&SajuRequest::solar(1990, 5, 15).at(10, 0))
        .unwrap();
    assert_eq!(chart.elements.total(), 8);
    assert_eq!(chart.elements.count(Element::Metal), 4);
    assert_eq!(chart.elements.count(Element::Fire), 3);
    assert_eq!(chart.elements.count(Element::Earth), 1);
    assert_eq!(chart.elements.missing(), vec![Element::Wood, Element::Water]);
    assert_eq!(chart.elements.dominant(), vec![Element::Metal]);
}

#[test]
fn test_ten_gods_and_favourable_element() {
    let kernel = Kernel::with_defaults();
    let chart = kernel
        .compute_saju_chart(&SajuRequest::solar(1990, 5, 15).at(10, 0))
        .unwrap();

    // 경 year, 신 month and 신 hour all share the metal day master
    let positions: Vec<StemPosition> = chart.ten_gods.iter().map(|g| g.position).collect();
    assert_eq!(
        positions,
        vec![StemPosition::Year, StemPosition::Month, StemPosition::Hour]
    );
    assert!(chart.ten_gods.iter().all(|g| g.god == TenGod::Companion));

    assert_eq!(chart.favourable.day_master, Element::Metal);
    assert!(chart.favourable.day_master_strong);
    assert_eq!(chart.favourable.favourable, Element::Water);
    assert_eq!(chart.favourable.unfavourable, Element::Fire);

    let date_only = kernel
        .compute_saju_chart(&SajuRequest::solar(1990, 5, 15))
        .unwrap();
    assert_eq!(date_only.ten_gods.len(), 2);
}

#[test]
fn test_compatibility_between_people() {
    let kernel = Kernel::with_defaults();
    let first = SajuRequest::solar(1990, 5, 15).at(10, 0);
    // 무오 day: earth feeds the 경 metal day master
    let second = SajuRequest::solar(2000, 1, 1);
    let result = kernel.compute_compatibility(&first, &second).unwrap();
    assert_eq!(result.first_day.korean(), "경진");
    assert_eq!(result.second_day.korean(), "무오");
    assert_eq!(result.factors, vec![CompatibilityFactor::Generating]);
    assert_eq!(result.score, 85);
    assert!(result.is_favourable());

    let same = kernel.compute_compatibility(&first, &first).unwrap();
    assert_eq!(same.score, 80);

    let bad = SajuRequest::solar(2023, 2, 29);
    assert!(kernel.compute_compatibility(&first, &bad).is_err());
}

#[test]
fn test_year_turns_at_start_of_spring() {
    let kernel = Kernel::with_defaults();

    let before = kernel
        .compute_saju_chart(&SajuRequest::solar(1990, 2, 3))
        .unwrap();
    assert_eq!(before.sexagenary_year, 1989);
    assert_eq!(before.year.korean(), "기사");
    assert_eq!(before.month.korean(), "정축");
    assert!(before.hour.is_none());

    let after = kernel
        .compute_saju_chart(&SajuRequest::solar(1990, 2, 4).at(12, 0))
        .unwrap();
    assert_eq!(after.sexagenary_year, 1990);
    assert_eq!(after.year.korean(), "경오");
    assert_eq!(after.sexagenary_month, 1);
}

#[test]
fn test_early_january_belongs_to_previous_pillar_year() {
    let kernel = Kernel::with_defaults();
    let chart = kernel
        .compute_saju_chart(&SajuRequest::solar(2000, 1, 2))
        .unwrap();
    assert_eq!(chart.sexagenary_year, 1999);
    assert_eq!(chart.sexagenary_month, 11);
    assert_eq!(chart.month.branch, EarthlyBranch::Ja);
}

#[test]
fn test_day_pillar_cycle() {
    let epoch = date(1900, 1, 31);
    let target = date(1990, 5, 15);
    let delta = (target - epoch).num_days();
    assert_eq!(delta, 32976);

    let pillar = SexagenaryCalendar::day_pillar(target);
    assert_eq!(pillar.stem.index() as i64, delta.rem_euclid(10));
    assert_eq!(pillar.branch.index() as i64, (delta + 4).rem_euclid(12));

    let mut day = date(1950, 1, 1);
    for _ in 0..200 {
        let today = SexagenaryCalendar::day_pillar(day);
        let sixty_later = SexagenaryCalendar::day_pillar(day + chrono::Duration::days(60));
        let tomorrow = SexagenaryCalendar::day_pillar(day + chrono::Duration::days(1));
        assert_eq!(today, sixty_later);
        assert_eq!(tomorrow.cycle_index(), (today.cycle_index() + 1) % 60);
        day += chrono::Duration::days(37);
    }
}

#[test]
fn test_hour_branches() {
    assert_eq!(SexagenaryCalendar::hour_branch_index(23), 0);
    assert_eq!(SexagenaryCalendar::hour_branch_index(0), 0);
    assert_eq!(SexagenaryCalendar::hour_branch_index(1), 1);
    assert_eq!(SexagenaryCalendar::hour_branch_index(12), 6);
    assert_eq!(SexagenaryCalendar::hour_branch_index(22), 11);
}

#[test]
fn test_historical_offset_moves_reading_across_midnight() {
    // Korea kept +08:30 in 1955
    let kernel = Kernel::with_defaults();
    let chart = kernel
        .compute_saju_chart(&SajuRequest::solar(1955, 1, 10).at(23, 45))
        .unwrap();
    assert_eq!(chart.instant.date(), date(1955, 1, 11));
    assert_eq!(chart.day, SexagenaryCalendar::day_pillar(date(1955, 1, 11)));
    assert_eq!(chart.hour.unwrap().branch, EarthlyBranch::Ja);

    let raw = Kernel::new(KernelConfig::default().with_historical_timezone(false));
    let chart = raw
        .compute_saju_chart(&SajuRequest::solar(1955, 1, 10).at(23, 45))
        .unwrap();
    assert_eq!(chart.instant.date(), date(1955, 1, 10));
}

#[test]
fn test_lunar_input() {
    let kernel = Kernel::with_defaults();
    let chart = kernel
        .compute_saju_chart(&SajuRequest::lunar(1990, 4, 21, false))
        .unwrap();
    assert_eq!(
        (chart.solar_date.year, chart.solar_date.month, chart.solar_date.day),
        (1990, 5, 15)
    );
    assert_eq!(chart.day.korean(), "경진");

    let leap = kernel
        .compute_saju_chart(&SajuRequest::lunar(2023, 2, 1, true))
        .unwrap();
    assert_eq!(
        (leap.solar_date.year, leap.solar_date.month, leap.solar_date.day),
        (2023, 3, 22)
    );
}

#[test]
fn test_invalid_lunar_date() {
    let kernel = Kernel::with_defaults();
    let err = kernel
        .compute_saju_chart(&SajuRequest::lunar(2024, 2, 1, true))
        .unwrap_err();
    assert!(matches!(err, KernelError::InvalidLunarDate { year: 2024, .. }));

    let err = kernel
        .compute_saju_chart(&SajuRequest::lunar(2024, 1, 31, false))
        .unwrap_err();
    assert!(matches!(err, KernelError::InvalidLunarDate { .. }));
}

#[test]
fn test_lunar_input_without_calendar_is_read_as_solar() {
    let kernel = Kernel::with_defaults().with_lunar_calendar(Box::new(UnavailableLunarCalendar));
    let chart = kernel
        .compute_saju_chart(&SajuRequest::lunar(1990, 5, 15, false))
        .unwrap();
    assert_eq!(chart.day.korean(), "경진");
    assert!(!chart.lunar_date.available);
}

#[test]
fn test_invalid_dates() {
    let kernel = Kernel::with_defaults();
    for request in [
        SajuRequest::solar(2023, 2, 29),
        SajuRequest::solar(2023, 13, 1),
        SajuRequest::solar(2023, 5, 1).at(24, 0),
        SajuRequest::solar(2023, 5, 1).at(10, 60),
    ] {
        let err = kernel.compute_saju_chart(&request).unwrap_err();
        assert!(matches!(err, KernelError::InvalidDate { .. }), "{:?}", request);
    }
}

#[test]
fn test_luck_cycle() {
    let kernel = Kernel::with_defaults();
    let chart = kernel
        .compute_saju_chart(&SajuRequest::solar(1990, 5, 15).at(10, 0).with_gender(Gender::Male))
        .unwrap();
    let luck = chart.luck.unwrap();
    assert_eq!(luck.direction, LuckDirection::Forward);
    assert_eq!(luck.periods.len(), 8);
    assert_eq!(luck.periods[0].pillar.korean(), "임오");
    assert_eq!(luck.period_at(17).unwrap().start_age, 15);

    let chart = kernel
        .compute_saju_chart(&SajuRequest::solar(1990, 5, 15).with_gender(Gender::Female))
        .unwrap();
    let luck = chart.luck.unwrap();
    assert_eq!(luck.direction, LuckDirection::Backward);
    assert_eq!(luck.periods[0].pillar.korean(), "경진");

    let chart = kernel
        .compute_saju_chart(&SajuRequest::solar(1990, 5, 15))
        .unwrap();
    assert!(chart.luck.is_none());
}

#[test]
fn test_chart_serializes_to_json() {
    let kernel = Kernel::with_defaults();
    let chart = kernel
        .compute_saju_chart(&SajuRequest::solar(1990, 5, 15).at(10, 0))
        .unwrap();
    let value = serde_json::to_value(&chart).unwrap();
    assert_eq!(value["day"]["stem"], "gyeong");
    assert_eq!(value["day"]["branch"], "jin");
    assert_eq!(value["sexagenary_year"], 1990);
    assert_eq!(value["elements"]["metal"], 4);
    assert_eq!(value["ten_gods"][0]["god"], "companion");
    assert_eq!(value["favourable"]["favourable"], "water");
}

#[test]
fn test_request_deserializes_with_defaults() -> anyhow::Result<()> {
    let request: SajuRequest = serde_json::from_str(
        r#"{"date": {"year": 1990, "month": 5, "day": 15, "hour": 10, "minute": 0}}"#,
    )?;
    assert_eq!(request, SajuRequest::solar(1990, 5, 15).at(10, 0));
    Ok(())
}
