//! Shared record fixtures for compiler tests: one nested record shape
//! with scalar, nullable, list, and record-valued fields.

use crate::{
    schema::{FieldKind, FieldModel, FieldValues, Introspect, RecordSchema},
    types::{Date, Float64},
    value::Value,
};

///
/// Address
///

#[derive(Clone, Debug, PartialEq)]
pub struct Address {
    pub city: String,
    pub zip: String,
}

const ADDRESS_SCHEMA: &RecordSchema = &RecordSchema {
    record_name: "Address",
    fields: &[
        FieldModel {
            name: "city",
            kind: FieldKind::Text,
        },
        FieldModel {
            name: "zip",
            kind: FieldKind::Text,
        },
    ],
};

impl Address {
    fn to_value(&self) -> Value {
        Value::Map(vec![
            ("city".to_string(), Value::Text(self.city.clone())),
            ("zip".to_string(), Value::Text(self.zip.clone())),
        ])
    }
}

///
/// Customer
///

#[derive(Clone, Debug, PartialEq)]
pub struct Customer {
    pub name: String,
    pub age: i64,
    pub score: Option<f64>,
    pub vip: bool,
    pub signup: Date,
    pub tags: Vec<String>,
    pub address: Address,
}

impl Customer {
    pub fn new(name: &str, age: i64) -> Self {
        Self {
            name: name.to_string(),
            age,
            score: None,
            vip: false,
            signup: Date::EPOCH,
            tags: Vec::new(),
            address: Address {
                city: "Riga".to_string(),
                zip: "LV-1010".to_string(),
            },
        }
    }

    pub fn score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub const fn vip(mut self) -> Self {
        self.vip = true;
        self
    }

    pub fn signup(mut self, iso: &str) -> Self {
        self.signup = Date::parse(iso).unwrap();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(ToString::to_string).collect();
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.address.city = city.to_string();
        self
    }
}

impl Introspect for Customer {
    const SCHEMA: &'static RecordSchema = &RecordSchema {
        record_name: "Customer",
        fields: &[
            FieldModel {
                name: "name",
                kind: FieldKind::Text,
            },
            FieldModel {
                name: "age",
                kind: FieldKind::Int,
            },
            FieldModel {
                name: "score",
                kind: FieldKind::Nullable(&FieldKind::Float),
            },
            FieldModel {
                name: "vip",
                kind: FieldKind::Bool,
            },
            FieldModel {
                name: "signup",
                kind: FieldKind::Date,
            },
            FieldModel {
                name: "tags",
                kind: FieldKind::List(&FieldKind::Text),
            },
            FieldModel {
                name: "address",
                kind: FieldKind::Record(ADDRESS_SCHEMA),
            },
        ],
    };
}

impl FieldValues for Customer {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "name" => Some(Value::Text(self.name.clone())),
            "age" => Some(Value::Int(self.age)),
            "score" => Some(
                self.score
                    .and_then(Float64::try_new)
                    .map_or(Value::Null, Value::Float),
            ),
            "vip" => Some(Value::Bool(self.vip)),
            "signup" => Some(Value::Date(self.signup)),
            "tags" => Some(Value::List(
                self.tags.iter().map(|tag| Value::Text(tag.clone())).collect(),
            )),
            "address" => Some(self.address.to_value()),
            _ => None,
        }
    }
}

/// The worked three-record set used across predicate and sort tests.
pub fn trio() -> Vec<Customer> {
    vec![
        Customer::new("Al", 30),
        Customer::new("Bo", 25),
        Customer::new("Al", 20),
    ]
}
