use formsmith_core::FieldId;
use proptest::prelude::*;

use super::{CommandOutcome, FormCommand, FormDocument};
use crate::config::{ConfigPatch, FormConfig, SubmitType, Theme};
use crate::field::{FieldPatch, FieldType, FormField, ValidationKind, ValidationRule};
use crate::template::FormTemplate;

fn document_with(types: &[FieldType]) -> FormDocument {
    let mut document = FormDocument::new();
    for field_type in types {
        document.add_field(*field_type, None);
    }
    document
}

fn ids(document: &FormDocument) -> Vec<FieldId> {
    document.fields().iter().map(FormField::id).collect()
}

fn field_type() -> impl Strategy<Value = FieldType> {
    prop::sample::select(FieldType::ALL.to_vec())
}

#[test]
fn add_field_inserts_at_index_and_selects_new_field() {
    let mut document = document_with(&[FieldType::Text, FieldType::Email]);
    let field_id = document.add_field(FieldType::Number, Some(1));

    assert_eq!(document.position(field_id), Some(1));
    assert_eq!(document.selected_field_id(), Some(field_id));
}

#[test]
fn add_field_appends_when_index_is_out_of_range() {
    let mut document = document_with(&[FieldType::Text]);
    let field_id = document.add_field(FieldType::Date, Some(7));

    assert_eq!(document.position(field_id), Some(1));
}

#[test]
fn add_field_accepts_index_equal_to_length() {
    let mut document = document_with(&[FieldType::Text, FieldType::Text]);
    let field_id = document.add_field(FieldType::Url, Some(2));

    assert_eq!(document.position(field_id), Some(2));
}

#[test]
fn update_field_merges_patch_and_ignores_unknown_ids() {
    let mut document = document_with(&[FieldType::Text]);
    let field_id = ids(&document)[0];

    assert!(document.update_field(
        field_id,
        FieldPatch {
            name: Some("company".to_owned()),
            ..FieldPatch::default()
        },
    ));
    assert_eq!(
        document.field(field_id).map(FormField::name),
        Some("company")
    );

    let snapshot = document.clone();
    assert!(!document.update_field(FieldId::new(), FieldPatch::default()));
    assert_eq!(document, snapshot);
}

#[test]
fn update_field_applies_type_verbatim() {
    let mut document = document_with(&[FieldType::Text]);
    let field_id = ids(&document)[0];

    document.update_field(
        field_id,
        FieldPatch {
            field_type: Some(FieldType::Select),
            ..FieldPatch::default()
        },
    );

    let field = document.field(field_id);
    assert_eq!(field.map(FormField::field_type), Some(FieldType::Select));
    assert_eq!(field.map(|field| field.options().len()), Some(0));
}

#[test]
fn removing_selected_field_clears_selection() {
    let mut document = document_with(&[FieldType::Text, FieldType::Email]);
    let field_id = ids(&document)[0];
    document.select_field(Some(field_id));

    assert!(document.remove_field(field_id));
    assert_eq!(document.selected_field_id(), None);
    assert_eq!(document.fields().len(), 1);
}

#[test]
fn removing_other_field_keeps_selection() {
    let mut document = document_with(&[FieldType::Text, FieldType::Email]);
    let field_ids = ids(&document);
    document.select_field(Some(field_ids[1]));

    assert!(document.remove_field(field_ids[0]));
    assert_eq!(document.selected_field_id(), Some(field_ids[1]));
}

#[test]
fn remove_unknown_field_is_a_no_op() {
    let mut document = document_with(&[FieldType::Text]);
    let snapshot = document.clone();

    assert!(!document.remove_field(FieldId::new()));
    assert_eq!(document, snapshot);
}

#[test]
fn duplicate_field_inserts_copy_after_original() {
    let mut document = document_with(&[FieldType::Email, FieldType::Text]);
    let original_id = ids(&document)[0];

    let Some(copy_id) = document.duplicate_field(original_id) else {
        panic!("duplicate should succeed for an existing field");
    };

    assert_ne!(copy_id, original_id);
    assert_eq!(document.position(copy_id), Some(1));
    assert_eq!(document.selected_field_id(), Some(copy_id));
    let copy = document.field(copy_id);
    assert_eq!(copy.map(FormField::name), Some("email_address_copy"));
    assert_eq!(copy.map(FormField::label), Some("Email Address (Copy)"));
}

#[test]
fn duplicate_unknown_field_returns_none() {
    let mut document = document_with(&[FieldType::Text]);
    let snapshot = document.clone();

    assert_eq!(document.duplicate_field(FieldId::new()), None);
    assert_eq!(document, snapshot);
}

#[test]
fn reorder_moves_and_shifts_instead_of_swapping() {
    let mut document = document_with(&[
        FieldType::Text,
        FieldType::Email,
        FieldType::Phone,
        FieldType::Date,
    ]);
    let before = ids(&document);

    assert!(document.reorder_fields(before[0], before[2]));
    assert_eq!(ids(&document), vec![before[1], before[2], before[0], before[3]]);

    assert!(document.reorder_fields(before[3], before[1]));
    assert_eq!(ids(&document), vec![before[3], before[2], before[0], before[1]]);
}

#[test]
fn reorder_ignores_missing_or_equal_ids() {
    let mut document = document_with(&[FieldType::Text, FieldType::Email]);
    let field_ids = ids(&document);

    assert!(!document.reorder_fields(field_ids[0], field_ids[0]));
    assert!(!document.reorder_fields(field_ids[0], FieldId::new()));
    assert_eq!(ids(&document), field_ids);
}

#[test]
fn select_field_accepts_unknown_ids_and_is_idempotent() {
    let mut document = FormDocument::new();
    let field_id = FieldId::new();

    document.select_field(Some(field_id));
    document.select_field(Some(field_id));
    assert_eq!(document.selected_field_id(), Some(field_id));
    assert!(document.selected_field().is_none());
}

#[test]
fn load_template_replaces_fields_and_clears_selection() {
    let mut document = document_with(&[FieldType::Utm, FieldType::File]);
    document.select_field(ids(&document).first().copied());

    assert!(document.load_template("contact"));
    assert_eq!(document.fields().len(), 3);
    assert_eq!(document.selected_field_id(), None);
    assert_eq!(document.fields()[0].field_type(), FieldType::Name);
}

#[test]
fn unknown_template_is_a_no_op() {
    let mut document = document_with(&[FieldType::Text]);
    let snapshot = document.clone();

    assert!(!document.load_template("does-not-exist"));
    assert_eq!(document, snapshot);
}

#[test]
fn apply_reports_created_field() {
    let mut document = FormDocument::new();
    let outcome = document.apply(FormCommand::AddField {
        field_type: FieldType::Radio,
        index: None,
    });

    assert!(outcome.changed);
    assert_eq!(outcome.created_field_id, document.selected_field_id());
}

#[test]
fn apply_validation_commands_use_replace_semantics() {
    let mut document = document_with(&[FieldType::Email]);
    let field_id = ids(&document)[0];

    document.apply(FormCommand::SetValidationRule {
        field_id,
        rule: ValidationRule::required(),
    });
    document.apply(FormCommand::SetValidationRule {
        field_id,
        rule: ValidationRule::required().with_message("Email is required"),
    });
    let field = document.field(field_id);
    assert_eq!(field.map(|field| field.validation().len()), Some(1));

    let outcome = document.apply(FormCommand::ClearValidationRule {
        field_id,
        kind: ValidationKind::Required,
    });
    assert!(outcome.changed);
    assert_eq!(document.field(field_id).map(FormField::is_required), Some(false));
}

#[test]
fn apply_option_commands_report_out_of_range_as_unchanged() {
    let mut document = document_with(&[FieldType::Select]);
    let field_id = ids(&document)[0];

    let outcome = document.apply(FormCommand::RemoveOption {
        field_id,
        index: 3,
    });
    assert_eq!(outcome, CommandOutcome::from_changed(false));

    document.apply(FormCommand::AddOption { field_id });
    assert_eq!(
        document.field(field_id).map(|field| field.options().len()),
        Some(4)
    );
}

#[test]
fn update_config_merges_settings() {
    let mut document = FormDocument::new();
    document.update_config(ConfigPatch {
        theme: Some(Theme::Solid),
        submit_type: Some(SubmitType::Ajax),
        ..ConfigPatch::default()
    });

    assert_eq!(document.config().theme, Theme::Solid);
    assert_eq!(document.config().submit_type, SubmitType::Ajax);
    assert_eq!(document.config().action, FormConfig::default().action);
}

proptest! {
    #[test]
    fn reorder_preserves_ids_and_places_active_at_over_index(
        types in prop::collection::vec(field_type(), 2..12),
        active in any::<prop::sample::Index>(),
        over in any::<prop::sample::Index>(),
    ) {
        let mut document = document_with(&types);
        let before = ids(&document);
        let active_index = active.index(before.len());
        let over_index = over.index(before.len());
        prop_assume!(active_index != over_index);

        prop_assert!(document.reorder_fields(before[active_index], before[over_index]));

        let mut after = ids(&document);
        prop_assert_eq!(after.len(), before.len());
        prop_assert_eq!(after[over_index], before[active_index]);

        let mut expected = before.clone();
        expected.sort();
        after.sort();
        prop_assert_eq!(after, expected);
    }

    #[test]
    fn duplicate_never_collides_and_lands_after_original(
        types in prop::collection::vec(field_type(), 1..10),
        target in any::<prop::sample::Index>(),
    ) {
        let mut document = document_with(&types);
        let before = ids(&document);
        let index = target.index(before.len());
        let original_name = document.fields()[index].name().to_owned();

        let copy_id = document.duplicate_field(before[index]);
        prop_assert!(copy_id.is_some());
        let copy_id = copy_id.unwrap_or_default();

        prop_assert!(!before.contains(&copy_id));
        prop_assert_eq!(document.position(copy_id), Some(index + 1));
        prop_assert_eq!(
            document.field(copy_id).map(|field| field.name().to_owned()),
            Some(format!("{original_name}_copy"))
        );
    }

    #[test]
    fn template_load_replaces_fields_wholesale(
        types in prop::collection::vec(field_type(), 0..8),
        template in prop::sample::select(FormTemplate::catalog().to_vec()),
    ) {
        let mut document = document_with(&types);
        let previous = ids(&document);

        prop_assert!(document.load_template(template.id()));

        let seeds: Vec<_> = document.fields().iter().map(FormField::to_seed).collect();
        prop_assert_eq!(seeds.as_slice(), template.fields());
        prop_assert!(ids(&document).iter().all(|field_id| !previous.contains(field_id)));
    }

    #[test]
    fn reset_is_total_and_idempotent(
        types in prop::collection::vec(field_type(), 0..8),
        select_first in any::<bool>(),
    ) {
        let mut document = document_with(&types);
        if select_first {
            document.select_field(ids(&document).first().copied());
        }
        document.update_config(ConfigPatch {
            dark_mode: Some(false),
            ..ConfigPatch::default()
        });

        document.reset();
        let once = document.clone();
        document.reset();

        prop_assert_eq!(&document, &once);
        prop_assert!(document.fields().is_empty());
        prop_assert_eq!(document.config(), &FormConfig::default());
        prop_assert_eq!(document.selected_field_id(), None);
    }
}
