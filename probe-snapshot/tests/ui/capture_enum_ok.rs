use probe_snapshot::{Capture, Captured};

#[derive(Capture)]
enum Event {
    Started,
    Progress { done: u32, total: u32 },
    Failed(String, #[capture(redact)] String),
}

fn main() {
    let events = [
        Event::Started,
        Event::Progress { done: 1, total: 2 },
        Event::Failed("io".into(), "detail".into()),
    ];
    for event in &events {
        let _ = event.type_name();
    }
}
