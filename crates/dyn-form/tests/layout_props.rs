use dyn_form::layout::{pair_rows, row_of};
use dyn_form::{
    compute_visibility, FieldDescriptor, FieldType, FormConfig, FormSession, FormValue,
    FormValues,
};
use proptest::prelude::*;

fn fields(count: usize, hidden: &[bool]) -> Vec<FieldDescriptor> {
    (0..count)
        .map(|i| {
            let field = FieldDescriptor::new(format!("F{i}"), FieldType::TextInput);
            if hidden.get(i).copied().unwrap_or(false) {
                field.with_hide_expression("true")
            } else {
                field
            }
        })
        .collect()
}

#[test]
fn five_fields_make_three_rows() {
    let config = FormConfig::new(fields(5, &[])).unwrap();
    let view = FormSession::new(config).view();
    let rows: Vec<Vec<&str>> = view
        .rows
        .iter()
        .map(|r| r.fields.iter().map(|f| f.key.as_str()).collect())
        .collect();
    assert_eq!(
        rows,
        vec![vec!["F0", "F1"], vec!["F2", "F3"], vec!["F4"]]
    );
}

#[test]
fn hidden_field_leaves_row_partner_alone() {
    let config = FormConfig::new(fields(5, &[false, true, false, false, false])).unwrap();
    let view = FormSession::new(config).view();
    assert_eq!(view.rows.len(), 3);
    assert_eq!(view.rows[0].fields.len(), 1);
    assert_eq!(view.rows[0].fields[0].key, "F0");
    assert_eq!(view.rows[1].fields[0].key, "F2");
}

proptest! {
    #[test]
    fn pairing_ignores_visibility(hidden in proptest::collection::vec(any::<bool>(), 0..24)) {
        let config = FormConfig::new(fields(hidden.len(), &hidden)).unwrap();
        let view = FormSession::new(config).view();

        prop_assert_eq!(view.rows.len(), hidden.len().div_ceil(2));
        for (r, row) in view.rows.iter().enumerate() {
            prop_assert_eq!(row.index, r);
            for field in &row.fields {
                let i: usize = field.key[1..].parse().unwrap();
                prop_assert_eq!(row_of(i), r);
                prop_assert!(!hidden[i]);
            }
        }
        let shown = view.fields().count();
        prop_assert_eq!(shown, hidden.iter().filter(|h| !**h).count());
    }

    #[test]
    fn rows_cover_every_index(count in 0usize..64) {
        let rows = pair_rows(count);
        let flat: Vec<usize> = rows.iter().flat_map(|r| r.clone()).collect();
        prop_assert_eq!(flat, (0..count).collect::<Vec<_>>());
        prop_assert!(rows.iter().all(|r| !r.is_empty() && r.len() <= 2));
    }

    #[test]
    fn visibility_keys_match_fields(
        count in 1usize..16,
        values in proptest::collection::vec("[a-z]{0,4}", 0..16),
    ) {
        let mut descriptors = fields(count, &[]);
        for (i, field) in descriptors.iter_mut().enumerate().skip(1) {
            *field = FieldDescriptor::new(format!("F{i}"), FieldType::TextInput)
                .with_hide_expression(&format!("formData.F{} === 'ab'", i - 1));
        }
        let mut state = FormValues::new();
        for (i, v) in values.iter().take(count).enumerate() {
            state.insert(format!("F{i}"), FormValue::Text(v.clone()));
        }

        let visibility = compute_visibility(&descriptors, &state);
        let keys: Vec<&str> = visibility.keys().collect();
        let expected: Vec<String> = (0..count).map(|i| format!("F{i}")).collect();
        prop_assert_eq!(keys, expected.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert!(visibility.is_visible("F0"));
        for i in 1..count {
            let prev = state.get(&format!("F{}", i - 1));
            let hidden = prev == Some(&FormValue::Text("ab".into()));
            prop_assert_eq!(visibility.is_visible(&format!("F{i}")), !hidden);
        }
    }
}
