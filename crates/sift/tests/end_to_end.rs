//! Full-pipeline checks through the facade surface: declarative
//! conditions arriving as JSON, compiled and applied to plain records.

use sift::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct Ticket {
    title: String,
    priority: i64,
    assignee: Option<String>,
}

impl Ticket {
    fn new(title: &str, priority: i64, assignee: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            priority,
            assignee: assignee.map(ToString::to_string),
        }
    }
}

impl Introspect for Ticket {
    const SCHEMA: &'static RecordSchema = &RecordSchema {
        record_name: "Ticket",
        fields: &[
            FieldModel {
                name: "title",
                kind: FieldKind::Text,
            },
            FieldModel {
                name: "priority",
                kind: FieldKind::Int,
            },
            FieldModel {
                name: "assignee",
                kind: FieldKind::Nullable(&FieldKind::Text),
            },
        ],
    };
}

impl FieldValues for Ticket {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "title" => Some(Value::Text(self.title.clone())),
            "priority" => Some(Value::Int(self.priority)),
            "assignee" => Some(self.assignee.clone().map_or(Value::Null, Value::Text)),
            _ => None,
        }
    }
}

fn backlog() -> Vec<Ticket> {
    vec![
        Ticket::new("fix login", 2, Some("mira")),
        Ticket::new("fix logout", 5, None),
        Ticket::new("ship exports", 5, Some("jon")),
        Ticket::new("triage crash", 9, Some("mira")),
    ]
}

#[test]
fn filter_then_sort() {
    let conditions = vec![
        Condition::starts_with("title", "fix").or_group("scope"),
        Condition::gte("priority", 9).or_group("scope"),
    ];
    let predicate = compile_grouped::<Ticket>(&conditions).unwrap();

    let kept = predicate.apply(backlog()).unwrap();
    assert_eq!(kept.len(), 3);

    let sort = compile_sort::<Ticket>(&[SortKey::desc("priority"), SortKey::asc("title")]).unwrap();
    let rows = sort.sorted(kept);

    let titles: Vec<_> = rows.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["triage crash", "fix logout", "fix login"]);
}

#[test]
fn wire_conditions_compile_under_a_chosen_policy() {
    let json = r#"[
        { "field": "priority", "op": "Gte", "value": { "Int": 5 } },
        { "field": "title", "op": "Contains", "value": { "Text": "fix" } }
    ]"#;
    let conditions: Vec<Condition> = serde_json::from_str(json).unwrap();

    let all = compile_with::<Ticket>(&conditions, CompilePolicy::FlatAnd).unwrap();
    let any = compile_with::<Ticket>(&conditions, CompilePolicy::FlatOr).unwrap();

    let kept_all = all.apply(backlog()).unwrap();
    let kept_any = any.apply(backlog()).unwrap();

    assert_eq!(kept_all.len(), 1);
    assert_eq!(kept_all[0].title, "fix logout");
    assert_eq!(kept_any.len(), 4);
}

#[test]
fn nullable_fields_error_rather_than_guess() {
    let predicate = compile_grouped::<Ticket>(&[Condition::eq("assignee", "mira")]).unwrap();

    let assigned = Ticket::new("fix login", 2, Some("mira"));
    assert!(predicate.matches(&assigned).unwrap());

    let unassigned = Ticket::new("fix logout", 5, None);
    assert!(predicate.matches(&unassigned).is_err());
}
