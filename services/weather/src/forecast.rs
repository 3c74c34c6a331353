//! Day-grouping transform over raw forecast entries

use chrono::NaiveDate;

use crate::models::{ForecastDay, ForecastEntry};

/// Days emitted per forecast.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Group 3-hourly entries into per-day aggregates: running min/max
/// temperature, first-seen description and icon. The current day is
/// skipped and at most [`MAX_FORECAST_DAYS`] days are returned. Entries
/// arrive in chronological order from the upstream.
pub fn group_by_day(entries: &[ForecastEntry], today: NaiveDate) -> Vec<ForecastDay> {
    let mut days: Vec<ForecastDay> = Vec::new();

    for entry in entries {
        let date = entry.timestamp.date_naive();
        if date <= today {
            continue;
        }

        match days.last_mut() {
            Some(day) if day.date == date => {
                day.temp_min = day.temp_min.min(entry.temperature);
                day.temp_max = day.temp_max.max(entry.temperature);
            }
            _ => {
                if days.len() == MAX_FORECAST_DAYS {
                    break;
                }
                days.push(ForecastDay {
                    date,
                    temp_min: entry.temperature,
                    temp_max: entry.temperature,
                    description: entry.description.clone(),
                    icon: entry.icon.clone(),
                });
            }
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(day: u32, hour: u32, temp: f64, description: &str) -> ForecastEntry {
        ForecastEntry {
            timestamp: Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap(),
            temperature: temp,
            description: description.to_string(),
            icon: format!("{:02}d", day),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn groups_entries_by_calendar_day() {
        let entries = vec![
            entry(2, 6, 4.0, "light rain"),
            entry(2, 12, 9.5, "scattered clouds"),
            entry(2, 18, 7.0, "clear sky"),
            entry(3, 12, 11.0, "clear sky"),
        ];

        let days = group_by_day(&entries, today());

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(days[0].temp_min, 4.0);
        assert_eq!(days[0].temp_max, 9.5);
        assert_eq!(days[1].temp_min, 11.0);
        assert_eq!(days[1].temp_max, 11.0);
    }

    #[test]
    fn keeps_first_seen_description_and_icon() {
        let entries = vec![
            entry(2, 6, 4.0, "light rain"),
            entry(2, 12, 9.5, "scattered clouds"),
        ];

        let days = group_by_day(&entries, today());

        assert_eq!(days[0].description, "light rain");
        assert_eq!(days[0].icon, "02d");
    }

    #[test]
    fn skips_the_current_day() {
        let entries = vec![
            entry(1, 9, 3.0, "mist"),
            entry(1, 21, 5.0, "mist"),
            entry(2, 9, 6.0, "clear sky"),
        ];

        let days = group_by_day(&entries, today());

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
    }

    #[test]
    fn caps_at_five_days() {
        let entries: Vec<ForecastEntry> =
            (2..=9).map(|day| entry(day, 12, day as f64, "clear sky")).collect();

        let days = group_by_day(&entries, today());

        assert_eq!(days.len(), MAX_FORECAST_DAYS);
        assert_eq!(days.last().unwrap().date, NaiveDate::from_ymd_opt(2026, 3, 6).unwrap());
    }

    #[test]
    fn empty_input_yields_empty_forecast() {
        assert!(group_by_day(&[], today()).is_empty());
    }
}
