mod helpers;
use helpers::*;
use linelog::{infof, infoln, Flags, Level};

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[test]
fn standard_header_shape() {
    let (lg, buf) = mem_logger("svc", Level::Debug, Flags::STANDARD);
    infof!(&lg, "x={}", 5);

    let text = text_of(&buf);
    assert!(text.ends_with('\n'));
    let parts: Vec<&str> = text.trim_end().split(' ').collect();
    assert_eq!(parts.len(), 5, "unexpected shape: {text:?}");
    assert_eq!(parts[0], "[INFO]");
    assert_eq!(parts[1], "svc");

    // date: YYYY/MM/DD, zero-padded
    let date: Vec<&str> = parts[2].split('/').collect();
    assert_eq!(date.len(), 3);
    assert_eq!(date[0].len(), 4);
    assert_eq!(date[1].len(), 2);
    assert_eq!(date[2].len(), 2);
    assert!(date.iter().all(|d| all_digits(d)), "bad date: {}", parts[2]);

    // time: HH:MM:SS, zero-padded
    let time: Vec<&str> = parts[3].split(':').collect();
    assert_eq!(time.len(), 3);
    assert!(
        time.iter().all(|t| t.len() == 2 && all_digits(t)),
        "bad time: {}",
        parts[3]
    );

    assert_eq!(parts[4], "x=5");
}

#[test]
fn microseconds_extend_the_time_field() {
    let (lg, buf) = mem_logger("svc", Level::Debug, Flags::TIME | Flags::MICROSECONDS);
    infof!(&lg, "m");

    let text = text_of(&buf);
    let parts: Vec<&str> = text.trim_end().split(' ').collect();
    assert_eq!(parts.len(), 4, "unexpected shape: {text:?}");
    let (secs, micros) = parts[2].split_once('.').expect("no fractional part");
    assert_eq!(secs.len(), 8);
    assert_eq!(micros.len(), 6);
    assert!(all_digits(micros), "bad microseconds: {micros}");
}

#[test]
fn line_variant_space_separates_values() {
    let (lg, buf) = mem_logger("svc", Level::Debug, Flags::NONE);
    infoln!(&lg, "a", 1, 2.5);
    assert_eq!(text_of(&buf), "[INFO] svc a 1 2.5\n");
}

#[test]
fn line_variant_with_no_values() {
    let (lg, buf) = mem_logger("svc", Level::Debug, Flags::NONE);
    infoln!(&lg);
    assert_eq!(text_of(&buf), "[INFO] svc \n");
}

#[test]
fn trailing_newline_is_never_doubled() {
    let (lg, buf) = mem_logger("svc", Level::Debug, Flags::NONE);
    infof!(&lg, "already terminated\n");
    assert_eq!(text_of(&buf), "[INFO] svc already terminated\n");

    buf.lock().unwrap().clear();
    infoln!(&lg, "ln variant");
    assert_eq!(text_of(&buf), "[INFO] svc ln variant\n");
}

#[test]
fn missing_newline_is_added() {
    let (lg, buf) = mem_logger("svc", Level::Debug, Flags::NONE);
    infof!(&lg, "no newline");
    assert_eq!(text_of(&buf), "[INFO] svc no newline\n");
}
