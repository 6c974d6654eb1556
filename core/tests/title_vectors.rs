//! Drive `TaskService::create` through a table of title cases.
//!
//! Each case names a raw title and the stored title it should produce, or
//! `None` when the service must refuse it. Accepted titles are read back
//! through `get_by_id` to check the stored shape.

use std::sync::Arc;

use tasks_core::{MemoryTaskRepository, Task, TaskError, TaskService};

struct Case {
    name: &'static str,
    raw: String,
    stored: Option<String>,
}

fn cases() -> Vec<Case> {
    vec![
        Case { name: "plain", raw: "buy milk".into(), stored: Some("buy milk".into()) },
        Case { name: "padded", raw: "  buy milk  ".into(), stored: Some("buy milk".into()) },
        Case { name: "tabs and newlines", raw: "\t walk dog \n".into(), stored: Some("walk dog".into()) },
        Case { name: "inner spaces kept", raw: "a  b".into(), stored: Some("a  b".into()) },
        Case { name: "single char", raw: "x".into(), stored: Some("x".into()) },
        Case { name: "exactly 100", raw: "y".repeat(100), stored: Some("y".repeat(100)) },
        Case { name: "101", raw: "z".repeat(101), stored: None },
        Case { name: "empty", raw: String::new(), stored: None },
        Case { name: "whitespace only", raw: "     ".into(), stored: None },
        Case { name: "100 multibyte", raw: "ü".repeat(100), stored: Some("ü".repeat(100)) },
    ]
}

#[tokio::test]
async fn title_vectors() {
    let service = TaskService::new(Arc::new(MemoryTaskRepository::new()));

    for case in cases() {
        let result = service.create(&case.raw).await;
        match (&case.stored, result) {
            (Some(expected), Ok(task)) => {
                assert_eq!(&task.title, expected, "{}: title", case.name);
                assert!(!task.done, "{}: done", case.name);
                let fetched = service.get_by_id(task.id).await.unwrap();
                assert_eq!(
                    fetched,
                    Task { id: task.id, title: expected.clone(), done: false },
                    "{}: read back",
                    case.name
                );
            }
            (None, Err(TaskError::InvalidTitle)) => {}
            (expected, got) => panic!("{}: expected {expected:?}, got {got:?}", case.name),
        }
    }

    let stored = service.list(None).await.unwrap();
    assert_eq!(stored.len(), 7);
}
