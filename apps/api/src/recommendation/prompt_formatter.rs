//! Format step: renders a submission into the user message of the completion request.
//!
//! Pure and infallible: absent fields render as empty strings. Field order follows
//! the form; every non-empty value appears verbatim in the output.

use crate::models::submission::{LabelList, SubmissionInput};
use crate::recommendation::profile::ReportProfile;

/// (long label, short label, value) for every submission field, in form order.
fn prompt_fields(input: &SubmissionInput) -> Vec<(&'static str, &'static str, String)> {
    vec![
        ("이름 또는 별명", "이름", input.identifier.clone()),
        ("선호하는(좋아하는) 업무 환경", "업무 환경 선호도", input.work_preference.clone()),
        ("창의적 사고를 자주 하시나요", "창의적 사고", input.creative_thinking.clone()),
        ("세부 사항에 주의를 기울이시나요", "세부 사항 주의", input.detail_oriented.clone()),
        ("사회적 상호작용을 즐기시나요", "사회적 상호작용", input.enjoy_social_interaction.clone()),
        ("일상적이고 반복적인 작업을 선호하시나요", "루틴 선호", input.prefer_routine.clone()),
        ("취미", "취미", input.hobby.clone()),
        ("MBTI 성격 유형", "MBTI", input.personality_code.clone()),
        ("관심 있는 산업분야", "관심 산업", list(&input.selected_industries)),
        ("목록에 없는 관심 산업분야", "기타 관심 산업", input.other_industry.clone()),
        ("관심 있는 직업분야", "관심 직업", list(&input.selected_jobs)),
        ("목록에 없는 관심 직업분야", "기타 관심 직업", input.other_job.clone()),
        ("해결하고 싶은 사회문제", "사회적 문제", input.social_issue.clone()),
        ("나에게도 의미가 있고 세상에도 기여할 수 있는 꿈", "꿈", input.dream.clone()),
        ("귀하에게 직업적 성공이란 무엇인가요", "직업적 성공 정의", input.success_definition.clone()),
        ("5년 또는 10년 내에 달성하고 싶은 경력 목표", "경력 계획", input.career_plan.clone()),
        ("자신의 강점과 약점", "자기 평가", input.self_evaluation.clone()),
        ("직업 체험, 인턴십, 자원봉사 경험", "직업 경험", input.job_experience.clone()),
    ]
}

fn list(labels: &LabelList) -> String {
    labels.as_slice().join(", ")
}

/// Builds the prompt text for `input` in the layout `profile` expects.
pub fn format_prompt(input: &SubmissionInput, profile: ReportProfile) -> String {
    let fields = prompt_fields(input);
    match profile {
        ReportProfile::Extended => fields
            .iter()
            .map(|(label, _, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join(",\n"),
        ReportProfile::Compact => fields
            .iter()
            .map(|(_, label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join(", "),
    }
}
