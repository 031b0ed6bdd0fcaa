use chrono::{Datelike, Duration, NaiveDate};
use myeongri::lunar::{LunarCalendar, TableLunarCalendar, UnavailableLunarCalendar};

#[test]
fn test_round_trip_across_table() {
    let calendar = TableLunarCalendar::new();
    let mut day = NaiveDate::from_ymd_opt(1900, 1, 31).unwrap();
    let end = NaiveDate::from_ymd_opt(2100, 12, 31).unwrap();
    while day <= end {
        let lunar = calendar.solar_to_lunar(day.year(), day.month(), day.day());
        assert!(lunar.available, "{}", day);
        let solar =
            calendar.lunar_to_solar(lunar.year, lunar.month, lunar.day, lunar.is_leap_month);
        assert!(solar.available, "{}", day);
        assert_eq!((solar.year, solar.month, solar.day), (day.year(), day.month(), day.day()));
        day += Duration::days(11);
    }
}

#[test]
fn test_known_conversions() {
    let calendar = TableLunarCalendar::new();
    let lunar = calendar.solar_to_lunar(1990, 5, 15);
    assert_eq!((lunar.year, lunar.month, lunar.day, lunar.is_leap_month), (1990, 4, 21, false));

    let solar = calendar.lunar_to_solar(2023, 2, 1, true);
    assert_eq!((solar.year, solar.month, solar.day), (2023, 3, 22));

    let solar = calendar.lunar_to_solar(2023, 3, 1, false);
    assert_eq!((solar.year, solar.month, solar.day), (2023, 4, 20));
}

#[test]
fn test_lunar_year_lengths() {
    let calendar = TableLunarCalendar::new();
    for year in 1900..2100 {
        let start = calendar.lunar_to_solar(year, 1, 1, false);
        let next = calendar.lunar_to_solar(year + 1, 1, 1, false);
        let start = NaiveDate::from_ymd_opt(start.year, start.month, start.day).unwrap();
        let next = NaiveDate::from_ymd_opt(next.year, next.month, next.day).unwrap();
        let length = (next - start).num_days();
        assert!((353..=385).contains(&length), "{}: {}", year, length);
        assert_eq!(length > 355, calendar.leap_month(year).is_some(), "{}", year);
    }
}

#[test]
fn test_out_of_range() {
    let calendar = TableLunarCalendar::new();
    assert!(!calendar.solar_to_lunar(1899, 12, 31).available);
    assert!(!calendar.solar_to_lunar(2101, 6, 1).available);
    assert!(!calendar.lunar_to_solar(2101, 6, 1, false).available);
    assert!(!calendar.lunar_to_solar(1990, 4, 31, false).available);
    assert!(!calendar.lunar_to_solar(1990, 4, 1, true).available);
    assert!(calendar.lunar_to_solar(1990, 5, 1, true).available);
}

#[test]
fn test_unavailable_calendar_echoes_input() {
    let calendar = UnavailableLunarCalendar;
    assert!(!calendar.is_available());
    let lunar = calendar.solar_to_lunar(2000, 1, 1);
    assert_eq!((lunar.year, lunar.month, lunar.day), (2000, 1, 1));
    assert!(!lunar.available);
    let solar = calendar.lunar_to_solar(2000, 1, 1, true);
    assert_eq!((solar.year, solar.month, solar.day), (2000, 1, 1));
    assert!(!solar.available);
}
