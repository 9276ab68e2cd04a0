use probe_snapshot::{Capture, Captured, Reflect};

#[derive(Capture)]
struct Session {
    id: u64,
    #[capture(redact)]
    token: String,
    #[capture(skip)]
    scratch: Vec<u8>,
}

#[derive(Capture)]
struct AdminSession {
    level: u8,
    #[capture(parent)]
    session: Session,
}

#[derive(Capture)]
struct Unit;

#[derive(Capture)]
struct Point(i32, i32);

fn assert_captured<T: Captured + Reflect>() {}

fn main() {
    assert_captured::<Session>();
    assert_captured::<AdminSession>();
    assert_captured::<Unit>();
    assert_captured::<Point>();

    let session = Session {
        id: 1,
        token: "t".into(),
        scratch: Vec::new(),
    };
    let _ = session.scratch.len();
    let _ = session.type_name();
}
