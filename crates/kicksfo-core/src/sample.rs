//! Bundled sample data, shown until a file is uploaded.

use crate::MatchEvent;

const SAMPLE_ROWS: [(&str, &str, &str, &str, bool, &str, &str, &str); 5] = [
    ("김선수", "얼굴", "앞발", "빠른발", true, "공격형", "앞발 빠른발", "8년"),
    ("김선수", "몸통", "앞발", "앞발", true, "공격형", "앞발 빠른발", "8년"),
    ("이선수", "몸통", "뒷발", "돌려차기", true, "수비형", "뒷발 돌려차기", "10년"),
    ("이선수", "얼굴", "뒷발", "돌려차기", false, "수비형", "뒷발 돌려차기", "10년"),
    ("박선수", "얼굴", "앞발", "빠른발", true, "혼합형", "속임 동작", "6년"),
];

/// The sample match events, in file order.
#[must_use]
pub fn sample_events() -> Vec<MatchEvent> {
    SAMPLE_ROWS
        .iter()
        .map(
            |&(athlete, target, foot, technique, success, style, signature, career)| MatchEvent {
                athlete: athlete.to_string(),
                target: target.to_string(),
                foot: foot.to_string(),
                technique: technique.to_string(),
                success,
                style: style.to_string(),
                signature: signature.to_string(),
                career: career.to_string(),
            },
        )
        .collect()
}
