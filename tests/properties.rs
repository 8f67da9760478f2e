//! Property tests over generated forms and footer lines.

use chrono::NaiveDate;
use notice_maker::compose::FOOTER_DELIMITER;
use notice_maker::grammar::{resolve_gender_from_relation, resolve_possessive_form};
use notice_maker::layout::select_variant;
use notice_maker::parse::split_footer;
use notice_maker::{FormData, Gender, GuardianStatus, Relation, StyleVariant, compose_notice, parse_notice_content};
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][a-z]{1,12}( [A-Z][a-z]{1,10}){0,2}",
        "[\u{0D15}-\u{0D39}][\u{0D3E}-\u{0D4C}]?[\u{0D15}-\u{0D39}]{0,6}",
    ]
}

fn status() -> impl Strategy<Value = GuardianStatus> {
    prop_oneof![
        Just(GuardianStatus::Alive),
        Just(GuardianStatus::DeceasedMale),
        Just(GuardianStatus::DeceasedFemale),
    ]
}

fn relation() -> impl Strategy<Value = Relation> {
    prop::sample::select(Relation::ALL.to_vec())
}

fn date() -> impl Strategy<Value = NaiveDate> {
    (1950i32..2100, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    })
}

fn complete_form() -> impl Strategy<Value = FormData> {
    (name(), name(), status(), relation(), name(), date()).prop_map(
        |(place, guardian_name, guardian_status, relation, deceased_name, date)| FormData {
            place,
            guardian_name,
            guardian_status,
            relation,
            deceased_name,
            date: Some(date),
        },
    )
}

fn footer_half() -> impl Strategy<Value = String> {
    "[A-Za-z0-9./-]{1,12}( [A-Za-z0-9./-]{1,8}){0,3}"
}

proptest! {
    #[test]
    fn composed_text_round_trips(form in complete_form()) {
        let text = form.notice_text();
        let parsed = parse_notice_content(&text);
        prop_assert!(parsed.is_some());
        prop_assert_eq!(parsed, compose_notice(&form));
    }

    #[test]
    fn any_missing_field_yields_empty_text(form in complete_form(), which in 0usize..4, blank in "[ \t]{0,3}") {
        let mut form = form;
        match which {
            0 => form.place = blank,
            1 => form.guardian_name = blank,
            2 => form.deceased_name = blank,
            _ => form.date = None,
        }
        prop_assert_eq!(form.notice_text(), "");
        prop_assert!(compose_notice(&form).is_none());
    }

    #[test]
    fn possessive_agrees_with_relation(form in complete_form()) {
        let expected = match form.relation {
            Relation::Son => Gender::Male,
            Relation::Daughter | Relation::Wife => Gender::Female,
        };
        prop_assert_eq!(resolve_gender_from_relation(form.relation), expected);
        prop_assert_eq!(form.deceased_gender(), expected);

        let other = match expected {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        };
        let body = compose_notice(&form).map(|n| n.main_text).unwrap_or_default();
        prop_assert!(body.contains(resolve_possessive_form(expected)));
        prop_assert!(!body.contains(resolve_possessive_form(other)));
    }

    #[test]
    fn footer_split_recovers_halves(left in footer_half(), right in footer_half()) {
        let line = format!("{left}{FOOTER_DELIMITER}{right}");
        let footer = split_footer(&line);
        prop_assert_eq!(footer.left, left);
        prop_assert_eq!(footer.right, right);
    }

    #[test]
    fn footer_without_gap_is_all_left(line in footer_half()) {
        let footer = split_footer(&line);
        prop_assert_eq!(footer.left, line);
        prop_assert_eq!(footer.right, "");
    }

    #[test]
    fn long_bodies_select_compact(len in 1usize..400) {
        let body = "x".repeat(len);
        let expected = if len > 200 { StyleVariant::Compact } else { StyleVariant::Standard };
        prop_assert_eq!(select_variant(&body, 200), expected);
    }

    #[test]
    fn parser_never_panics(text in "(?s).{0,300}") {
        let _ = parse_notice_content(&text);
    }
}
