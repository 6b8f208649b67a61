use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Accepted 조건 타입
pub const CONDITION_ACCEPTED: &str = "Accepted";
/// Programmed 조건 타입
pub const CONDITION_PROGRAMMED: &str = "Programmed";
/// ResolvedRefs 조건 타입
pub const CONDITION_RESOLVED_REFS: &str = "ResolvedRefs";

/// 수락 사유
pub const REASON_ACCEPTED: &str = "Accepted";
/// 프로그래밍 완료 사유
pub const REASON_PROGRAMMED: &str = "Programmed";
/// 참조 해소 완료 사유
pub const REASON_RESOLVED_REFS: &str = "ResolvedRefs";
/// 검증 실패 사유
pub const REASON_UNSUPPORTED_VALUE: &str = "UnsupportedValue";

/// 조건의 상태 값입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

/// 리소스 상태에 기록되는 조건입니다.
///
/// 형식은 Kubernetes의 metav1.Condition을 따르며, 전이 시각은 조건을
/// 만드는 시점에 기록됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// 조건 타입 (Accepted, Programmed, ResolvedRefs)
    #[serde(rename = "type")]
    pub condition_type: String,

    /// True, False, Unknown 중 하나
    pub status: ConditionStatus,

    /// 기계가 읽는 짧은 사유
    pub reason: String,

    /// 사람이 읽는 설명
    pub message: String,

    /// 조건을 계산할 때 관측한 리소스 세대
    pub observed_generation: i64,

    /// 조건이 이 상태로 전이한 시각 (RFC 3339)
    #[serde(with = "time::serde::rfc3339")]
    pub last_transition_time: OffsetDateTime,
}

impl Condition {
    pub fn new(
        condition_type: &str,
        status: ConditionStatus,
        reason: &str,
        message: &str,
        observed_generation: i64,
    ) -> Self {
        Condition {
            condition_type: condition_type.to_string(),
            status,
            reason: reason.to_string(),
            message: message.to_string(),
            observed_generation,
            last_transition_time: OffsetDateTime::now_utc(),
        }
    }

    /// 타입이 일치하고 상태가 True인지 검사합니다.
    pub fn is_true(&self, condition_type: &str) -> bool {
        self.condition_type == condition_type && self.status == ConditionStatus::True
    }
}
