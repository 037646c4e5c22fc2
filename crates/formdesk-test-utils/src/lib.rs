//! Testing utilities for Formdesk workspace
//!
//! Shared fixtures, JSON tree generators, and helpers.

#![allow(missing_docs)]

use formdesk_value::FormSubmission;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Requests as the validator dashboard receives them, keyed by status
pub fn sample_requests_json() -> Value {
    json!({
        "pending": [
            {
                "id": "REQ-1001",
                "status": "pending",
                "createdAt": "2023-05-15T09:30:00Z",
                "submittedBy": "user123",
                "formData": {
                    "applicationType": "leave",
                    "name": "John Doe",
                    "employeeId": "EMP-2045",
                    "department": "Engineering",
                    "leaveType": "vacation",
                    "startDate": "2023-06-01",
                    "endDate": "2023-06-07",
                    "reason": "Family vacation",
                    "contactInfo": {
                        "phone": "+1234567890",
                        "email": "john.doe@company.com"
                    }
                }
            },
            {
                "id": "REQ-1002",
                "status": "pending",
                "createdAt": "2020-05-16T11:45:00Z",
                "submittedBy": "user456",
                "formData": {
                    "applicationType": "purchase",
                    "name": "Jane Smith",
                    "employeeId": "EMP-3092",
                    "department": "Marketing",
                    "item": "New laptop",
                    "cost": 1299.99,
                    "justification": "Current laptop is 5 years old and frequently crashes",
                    "vendor": "Dell Technologies",
                    "urgency": "high"
                }
            }
        ],
        "approved": [
            {
                "id": "REQ-0901",
                "status": "approved",
                "createdAt": "2023-05-10T14:20:00Z",
                "approvedAt": "2023-05-11T10:15:00Z",
                "approvedBy": "validator001",
                "submittedBy": "user789",
                "formData": {
                    "applicationType": "conference",
                    "name": "Alex Johnson",
                    "employeeId": "EMP-4021",
                    "department": "Sales",
                    "conferenceName": "Tech Summit 2023",
                    "location": "San Francisco",
                    "dates": "2023-07-15 to 2023-07-18",
                    "estimatedCost": 2450.00,
                    "expectedOutcome": "Networking and learning new sales techniques"
                }
            }
        ],
        "rejected": [
            {
                "id": "REQ-0802",
                "status": "rejected",
                "createdAt": "2023-05-08T16:30:00Z",
                "rejectedAt": "2023-05-09T09:45:00Z",
                "rejectedBy": "validator002",
                "rejectionComment": "Budget constraints - please find a lower-cost alternative",
                "submittedBy": "user654",
                "formData": {
                    "applicationType": "equipment",
                    "name": "Michael Brown",
                    "employeeId": "EMP-1056",
                    "department": "Design",
                    "equipmentType": "Wacom Cintiq 32",
                    "cost": 3299.99,
                    "justification": "Need for high-end design work",
                    "alternativeOptionsConsidered": ["iPad Pro", "Huion Kamvas"]
                }
            }
        ]
    })
}

/// Requests of one status (`"pending"`, `"approved"` or `"rejected"`)
pub fn sample_requests(status: &str) -> Value {
    sample_requests_json()
        .get(status)
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()))
}

/// First request of one status
pub fn sample_request(status: &str) -> Value {
    sample_requests(status)
        .get(0)
        .cloned()
        .unwrap_or(Value::Null)
}

/// Submission with records inside lists inside records
pub fn nested_submission() -> FormSubmission {
    FormSubmission::from_json(&json!({
        "applicant": "Jane Smith",
        "address": {
            "street": "1 Main St",
            "geo": {"lat": 37.77, "lng": -122.42}
        },
        "contact": {"email": "jane@company.com"},
        "items": [
            {"name": "x", "qty": 1},
            {"name": "y", "qty": 2, "tags": ["a", {"k": null}]}
        ],
        "approved": false
    }))
    .unwrap()
}

/// Record nested `depth` levels deep under key `k`, ending in `"leaf"`
pub fn deep_submission(depth: usize) -> FormSubmission {
    let mut value = Value::String("leaf".to_string());
    for _ in 0..depth {
        let mut map = Map::new();
        map.insert("k".to_string(), value);
        value = Value::Object(map);
    }
    let mut root = Map::new();
    root.insert("root".to_string(), value);
    FormSubmission::from_json(&Value::Object(root)).unwrap()
}

/// Arbitrary record key, including empty keys and path punctuation
pub fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z_]{1,6}",
        1 => "[a-z.\\[\\]\"\\\\]{0,5}",
    ]
}

/// Arbitrary JSON tree of bounded depth and breadth
pub fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,10}".prop_map(Value::String),
    ];
    leaf.prop_recursive(5, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..5)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// Arbitrary form submission (a JSON object at the root)
pub fn arb_submission() -> impl Strategy<Value = FormSubmission> {
    prop::collection::vec(("[a-z_]{1,6}", arb_json()), 0..6).prop_map(|entries| {
        let object: Map<String, Value> = entries.into_iter().collect();
        FormSubmission::from_json(&Value::Object(object))
            .unwrap_or_default()
    })
}
