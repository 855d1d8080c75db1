#[cfg(test)]
mod time_range_tests {
    use crate::services::time_range::{
        overlaps, parse_time_range, TimeInterval, TimeOfDay, TimeRangeError,
    };

    fn t(hour: u32, minute: u32) -> TimeOfDay {
        TimeOfDay::from_hm(hour, minute).unwrap()
    }

    fn interval(start: (u32, u32), end: (u32, u32)) -> TimeInterval {
        TimeInterval::new(t(start.0, start.1), t(end.0, end.1)).unwrap()
    }

    #[test]
    fn test_parse_valid_range() {
        let parsed = parse_time_range("10:00-11:00").unwrap();
        assert_eq!(parsed.start(), t(10, 0));
        assert_eq!(parsed.end(), t(11, 0));
        assert_eq!(parsed.to_string(), "10:00-11:00");
    }

    #[test]
    fn test_parse_trims_segments() {
        let parsed = parse_time_range("  09:15 -  17:45 ").unwrap();
        assert_eq!(parsed, interval((9, 15), (17, 45)));
    }

    #[test]
    fn test_parse_rejects_reversed_range() {
        let result = parse_time_range("11:00-10:00");
        assert_eq!(
            result,
            Err(TimeRangeError::NonPositiveDuration {
                start: t(11, 0),
                end: t(10, 0),
            })
        );
    }

    #[test]
    fn test_parse_rejects_zero_length_range() {
        let result = parse_time_range("10:00-10:00");
        assert!(matches!(
            result,
            Err(TimeRangeError::NonPositiveDuration { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let result = parse_time_range("10:00");
        assert_eq!(
            result,
            Err(TimeRangeError::Malformed {
                input: "10:00".to_string()
            })
        );
    }

    #[test]
    fn test_parse_rejects_extra_separators() {
        let result = parse_time_range("10:00-11:00-12:00");
        assert!(matches!(result, Err(TimeRangeError::Malformed { .. })));
    }

    #[test]
    fn test_parse_reports_offending_segment() {
        assert_eq!(
            parse_time_range("ab:00-11:00"),
            Err(TimeRangeError::InvalidTimeFormat {
                segment: "ab:00".to_string()
            })
        );
        assert_eq!(
            parse_time_range("10:00-25:00"),
            Err(TimeRangeError::InvalidTimeFormat {
                segment: "25:00".to_string()
            })
        );
        assert_eq!(
            parse_time_range("-11:00"),
            Err(TimeRangeError::InvalidTimeFormat {
                segment: "".to_string()
            })
        );
    }

    #[test]
    fn test_error_messages_are_readable() {
        let err = parse_time_range("11:00-10:00").unwrap_err();
        assert_eq!(err.to_string(), "end time 10:00 must be after start time 11:00");
    }

    #[test]
    fn test_touching_intervals_do_not_overlap() {
        let morning = interval((9, 0), (10, 0));
        let next = interval((10, 0), (11, 0));
        assert!(!overlaps(&morning, &next));
        assert!(!overlaps(&next, &morning));
    }

    #[test]
    fn test_contained_and_crossing_intervals_overlap() {
        assert!(overlaps(&interval((9, 0), (11, 0)), &interval((10, 0), (10, 30))));
        assert!(overlaps(&interval((9, 0), (10, 0)), &interval((9, 30), (10, 30))));
        assert!(overlaps(&interval((9, 0), (10, 0)), &interval((9, 0), (10, 0))));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let samples = [
            interval((8, 0), (9, 0)),
            interval((8, 30), (9, 30)),
            interval((9, 0), (10, 0)),
            interval((7, 0), (12, 0)),
            interval((11, 59), (12, 0)),
        ];

        for a in &samples {
            for b in &samples {
                assert_eq!(overlaps(a, b), overlaps(b, a), "{a} vs {b}");
            }
        }
    }
}
