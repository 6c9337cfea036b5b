//! Fixed option lists offered by the submission form.

use serde::Serialize;

pub const WORK_PREFERENCES: [&str; 4] = ["팀워크 중시", "독립적 업무", "혁신적 환경", "안정적 환경"];

pub const YES_NO: [&str; 2] = ["예", "아니오"];

pub const PERSONALITY_CODES: [&str; 16] = [
    "INTJ", "INTP", "ENTJ", "ENTP", "INFJ", "INFP", "ENFJ", "ENFP", "ISTJ", "ISFJ", "ESTJ",
    "ESFJ", "ISTP", "ISFP", "ESTP", "ESFP",
];

pub const INDUSTRIES: [&str; 11] = [
    "IT/소프트웨어",
    "금융",
    "제조",
    "서비스",
    "교육",
    "의료/보건",
    "미디어/광고",
    "무역",
    "건설",
    "공공/정부",
    "기타",
];

pub const JOBS: [&str; 11] = [
    "소프트웨어 개발자",
    "마케터",
    "의사",
    "디자이너",
    "교사",
    "엔지니어",
    "회계사",
    "작가",
    "운동선수",
    "연구원",
    "기타",
];

#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub work_preferences: &'static [&'static str],
    pub yes_no: &'static [&'static str],
    pub personality_codes: &'static [&'static str],
    pub industries: &'static [&'static str],
    pub jobs: &'static [&'static str],
}

pub fn catalog() -> Catalog {
    Catalog {
        work_preferences: &WORK_PREFERENCES,
        yes_no: &YES_NO,
        personality_codes: &PERSONALITY_CODES,
        industries: &INDUSTRIES,
        jobs: &JOBS,
    }
}
