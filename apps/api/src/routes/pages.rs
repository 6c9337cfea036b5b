//! Server-rendered pages: landing, questionnaire, result and the static pages.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::{Form, WithRejection};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::submission::RecordId;
use crate::recommendation::catalog::{catalog, Catalog};
use crate::recommendation::form::SubmissionForm;
use crate::report::classifier::{classify, sections, ReportSection};
use crate::report::REPORT_TITLE;
use crate::state::AppState;

pub struct Question {
    pub name: &'static str,
    pub label: &'static str,
}

const YES_NO_QUESTIONS: [Question; 4] = [
    Question {
        name: "creative_thinking",
        label: "창의적 사고를 자주 하시나요?",
    },
    Question {
        name: "detail_oriented",
        label: "세부 사항에 주의를 기울이시나요?",
    },
    Question {
        name: "enjoy_social_interaction",
        label: "사회적 상호작용을 즐기시나요?",
    },
    Question {
        name: "prefer_routine",
        label: "일상적이고 반복적인 작업을 선호하시나요?",
    },
];

const OPEN_QUESTIONS: [Question; 6] = [
    Question {
        name: "social_issue",
        label: "해결하고 싶은 사회문제 (예: 저출산, 고령화, 기아, 노동력 부족, 지역 경제 활성화)",
    },
    Question {
        name: "dream",
        label: "나에게도 의미가 있고 세상에도 기여할 수 있는 이루고 싶은 꿈",
    },
    Question {
        name: "success_definition",
        label: "귀하에게 직업적 성공이란 무엇인가요?",
    },
    Question {
        name: "career_plan",
        label: "앞으로 5년 또는 10년 내에 달성하고 싶은 경력 목표가 있나요?",
    },
    Question {
        name: "self_evaluation",
        label: "자신의 강점, 약점에 대해 서술해주세요",
    },
    Question {
        name: "job_experience",
        label: "이전에 가졌던 직업 체험, 인턴십, 자원봉사 등에 대해 자유롭게 서술해주세요",
    },
];

/// `id` is the row a form submission created. `identifier` is the
/// most-recent-by-nickname fallback for bookmarked links.
#[derive(Debug, Deserialize)]
pub struct ResultQuery {
    pub id: Option<RecordId>,
    pub identifier: Option<String>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

#[derive(Template)]
#[template(path = "recommendation.html")]
pub struct RecommendationTemplate {
    pub catalog: Catalog,
    pub yes_no_questions: &'static [Question],
    pub open_questions: &'static [Question],
}

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub title: &'static str,
    pub identifier: String,
    pub sections: Vec<ReportSection>,
    pub download_href: String,
    pub filename: String,
}

#[derive(Template)]
#[template(path = "privacy.html")]
pub struct PrivacyTemplate;

#[derive(Template)]
#[template(path = "terms.html")]
pub struct TermsTemplate;

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

fn render_page<T: Template>(template: T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

/// GET /
pub async fn handle_index() -> Result<Html<String>, AppError> {
    render_page(IndexTemplate)
}

/// GET /recommendation
pub async fn handle_form() -> Result<Html<String>, AppError> {
    render_page(RecommendationTemplate {
        catalog: catalog(),
        yes_no_questions: &YES_NO_QUESTIONS,
        open_questions: &OPEN_QUESTIONS,
    })
}

/// POST /recommendation
/// Runs the pipeline and redirects to the result page for the stored row.
pub async fn handle_form_submit(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<SubmissionForm>, AppError>,
) -> Result<Redirect, AppError> {
    let submission = state.pipeline.submit(form).await?;
    info!(
        "Form submission {} stored, redirecting to result",
        submission.record_id
    );
    Ok(Redirect::to(&result_location(submission.record_id)))
}

fn result_location(id: RecordId) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("id", &id.to_string())
        .finish();
    format!("/result?{query}")
}

/// GET /result?id= (or ?identifier=)
pub async fn handle_result(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<ResultQuery>, AppError>,
) -> Result<Html<String>, AppError> {
    let view = match params.id {
        Some(id) => state.pipeline.report(id).await?,
        None => {
            let identifier = params.identifier.unwrap_or_default();
            state.pipeline.latest_report(&identifier).await?
        }
    };

    let lines = classify(
        &view.record.generated_report,
        state.pipeline.profile().section_count(),
    );

    render_page(ResultTemplate {
        title: REPORT_TITLE,
        identifier: view.record.input.identifier,
        sections: sections(&lines),
        download_href: view.document.data_uri(),
        filename: state.config.report_filename.clone(),
    })
}

/// GET /privacy
pub async fn handle_privacy() -> Result<Html<String>, AppError> {
    render_page(PrivacyTemplate)
}

/// GET /terms
pub async fn handle_terms() -> Result<Html<String>, AppError> {
    render_page(TermsTemplate)
}

/// GET /about
pub async fn handle_about() -> Result<Html<String>, AppError> {
    render_page(AboutTemplate)
}
