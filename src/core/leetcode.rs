use crate::domain::model::{deserialize_id, FetchOutcome, Problem, Submission};
use crate::domain::ports::SubmissionSource;
use crate::utils::error::{ArchiveError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, REFERER};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "https://leetcode.com";
pub const DEFAULT_PAGE_SIZE: usize = 10_000;

const ALL_PROBLEMS_QUERY: &str = "\
query problemsetQuestionList($categorySlug: String, $limit: Int, $skip: Int, $filters: QuestionListFilterInput) {
  problemsetQuestionList: questionList(categorySlug: $categorySlug, limit: $limit, skip: $skip, filters: $filters) {
    total: totalNum
    questions: data {
      frontendQuestionId: questionFrontendId
      title
      titleSlug
      difficulty
      status
    }
  }
}";

const PROBLEM_DETAILS_QUERY: &str = "\
query questionDetail($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    questionId
  }
}";

/// Session cookie and CSRF token copied from a logged-in browser.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub session: String,
    pub csrf_token: String,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProblemListData {
    problemset_question_list: ProblemPage,
}

#[derive(Debug, Deserialize)]
struct ProblemPage {
    total: Option<usize>,
    questions: Vec<Problem>,
}

#[derive(Debug, Deserialize)]
struct QuestionDetailData {
    question: Option<QuestionDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionDetail {
    #[serde(deserialize_with = "deserialize_id")]
    question_id: u32,
}

#[derive(Debug, Deserialize)]
struct LatestSubmission {
    code: String,
}

enum IdLookup {
    Resolved(u32),
    Unknown,
    Failed(u16),
}

pub struct LeetCodeClient {
    client: Client,
    base_url: String,
    language: String,
    page_size: usize,
}

impl LeetCodeClient {
    pub fn new(base_url: &str, credentials: &Credentials, language: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(REFERER, header_value("source.base_url", &base_url)?);
        headers.insert(
            "x-csrftoken",
            header_value("auth.csrf_token", &credentials.csrf_token)?,
        );
        headers.insert(
            COOKIE,
            header_value(
                "auth.session",
                &format!("LEETCODE_SESSION={}", credentials.session),
            )?,
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url,
            language: language.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn graphql_url(&self) -> String {
        format!("{}/graphql", self.base_url)
    }

    fn submissions_url(&self) -> String {
        format!("{}/submissions/latest/", self.base_url)
    }

    fn graphql(&self, query: &str, variables: serde_json::Value) -> RequestBuilder {
        self.client
            .post(self.graphql_url())
            .json(&json!({ "query": query, "variables": variables }))
    }

    async fn list_page(&self, skip: usize) -> Result<ProblemPage> {
        let variables = json!({
            "categorySlug": "",
            "skip": skip,
            "limit": self.page_size,
            "filters": {}
        });

        tracing::debug!("Listing problems (skip {}, limit {})", skip, self.page_size);
        let response = self.graphql(ALL_PROBLEMS_QUERY, variables).send().await?;
        if !response.status().is_success() {
            return Err(ArchiveError::ApiStatusError {
                url: self.graphql_url(),
                status: response.status().as_u16(),
            });
        }

        let body: GraphqlResponse<ProblemListData> = response.json().await?;
        body.data
            .map(|data| data.problemset_question_list)
            .ok_or_else(|| ArchiveError::unexpected("problem listing returned no data"))
    }

    /// `None` when the endpoint answers with a non-2xx status.
    async fn latest_code(&self, question_id: u32) -> Result<Option<String>> {
        let response = self
            .client
            .get(self.submissions_url())
            .query(&[
                ("qid", question_id.to_string()),
                ("lang", self.language.clone()),
            ])
            .send()
            .await?;

        tracing::debug!(
            "Latest submission for qid {}: {}",
            question_id,
            response.status()
        );
        if !response.status().is_success() {
            return Ok(None);
        }

        let submission: LatestSubmission = response.json().await?;
        Ok(Some(submission.code))
    }

    async fn resolve_question_id(&self, title_slug: &str) -> Result<IdLookup> {
        let response = self
            .graphql(PROBLEM_DETAILS_QUERY, json!({ "titleSlug": title_slug }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(IdLookup::Failed(response.status().as_u16()));
        }

        let body: GraphqlResponse<QuestionDetailData> = response.json().await?;
        let data = body
            .data
            .ok_or_else(|| ArchiveError::unexpected("question detail returned no data"))?;

        Ok(match data.question {
            Some(detail) => IdLookup::Resolved(detail.question_id),
            None => IdLookup::Unknown,
        })
    }
}

#[async_trait]
impl SubmissionSource for LeetCodeClient {
    async fn solved_problems(&self) -> Result<Vec<Problem>> {
        let mut problems = Vec::new();
        let mut skip = 0;

        loop {
            let page = self.list_page(skip).await?;
            let fetched = page.questions.len();
            problems.extend(page.questions);
            skip += fetched;

            let exhausted = page.total.map(|total| skip >= total).unwrap_or(false);
            if fetched < self.page_size || exhausted {
                break;
            }
        }

        let listed = problems.len();
        problems.retain(Problem::is_solved);
        tracing::info!("Found {} solved problems out of {}", problems.len(), listed);
        Ok(problems)
    }

    async fn fetch_submission(&self, problem: &Problem) -> Result<FetchOutcome> {
        if let Some(code) = self.latest_code(problem.id).await? {
            return Ok(FetchOutcome::Success(Submission {
                question_id: problem.id,
                code,
            }));
        }

        tracing::warn!(
            "Couldn't fetch code for question '{}' with url {}, retrying...",
            problem.title,
            self.problem_url(problem)
        );

        let question_id = match self.resolve_question_id(&problem.title_slug).await? {
            IdLookup::Resolved(id) => id,
            IdLookup::Unknown => {
                tracing::debug!("No question found for slug '{}'", problem.title_slug);
                return Ok(FetchOutcome::NotFound);
            }
            IdLookup::Failed(status) => {
                return Ok(FetchOutcome::Failed {
                    reason: format!("question detail lookup returned status {}", status),
                });
            }
        };

        tracing::debug!(
            "Resolved '{}' to question id {} (listing said {})",
            problem.title_slug,
            question_id,
            problem.id
        );

        Ok(match self.latest_code(question_id).await? {
            Some(code) => FetchOutcome::Success(Submission { question_id, code }),
            None => FetchOutcome::NotFound,
        })
    }

    fn problem_url(&self, problem: &Problem) -> String {
        format!("{}/problems/{}/", self.base_url, problem.title_slug)
    }
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| ArchiveError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: format!("not usable as an HTTP header: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Difficulty;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> LeetCodeClient {
        let credentials = Credentials {
            session: "session-cookie".to_string(),
            csrf_token: "csrf-token".to_string(),
        };
        LeetCodeClient::new(&server.base_url(), &credentials, "java").unwrap()
    }

    fn problem(id: u32, title: &str, slug: &str) -> Problem {
        Problem {
            id,
            title: title.to_string(),
            title_slug: slug.to_string(),
            difficulty: Difficulty::Medium,
            status: Some("ac".to_string()),
        }
    }

    #[tokio::test]
    async fn test_solved_problems_filters_and_keeps_order() {
        let server = MockServer::start_async().await;
        let listing = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/graphql")
                    .header("x-csrftoken", "csrf-token")
                    .header("cookie", "LEETCODE_SESSION=session-cookie")
                    .body_contains("problemsetQuestionList");
                then.status(200).json_body(serde_json::json!({
                    "data": {"problemsetQuestionList": {"total": 3, "questions": [
                        {"frontendQuestionId": "49", "title": "Group Anagrams", "titleSlug": "group-anagrams", "difficulty": "Medium", "status": "ac"},
                        {"frontendQuestionId": "1", "title": "Two Sum", "titleSlug": "two-sum", "difficulty": "Easy", "status": "notac"},
                        {"frontendQuestionId": "20", "title": "Valid Parentheses", "titleSlug": "valid-parentheses", "difficulty": "Easy", "status": "ac"}
                    ]}}
                }));
            })
            .await;

        let problems = client_for(&server).solved_problems().await.unwrap();

        listing.assert_async().await;
        let ids: Vec<u32> = problems.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![49, 20]);
    }

    #[tokio::test]
    async fn test_solved_problems_pages_until_total() {
        let server = MockServer::start_async().await;
        let first = server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql").body_contains("\"skip\":0");
                then.status(200).json_body(serde_json::json!({
                    "data": {"problemsetQuestionList": {"total": 3, "questions": [
                        {"frontendQuestionId": "1", "title": "Two Sum", "titleSlug": "two-sum", "difficulty": "Easy", "status": "ac"},
                        {"frontendQuestionId": "2", "title": "Add Two Numbers", "titleSlug": "add-two-numbers", "difficulty": "Medium", "status": "ac"}
                    ]}}
                }));
            })
            .await;
        let second = server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql").body_contains("\"skip\":2");
                then.status(200).json_body(serde_json::json!({
                    "data": {"problemsetQuestionList": {"total": 3, "questions": [
                        {"frontendQuestionId": "3", "title": "Longest Substring Without Repeating Characters", "titleSlug": "longest-substring-without-repeating-characters", "difficulty": "Medium", "status": "ac"}
                    ]}}
                }));
            })
            .await;

        let problems = client_for(&server)
            .with_page_size(2)
            .solved_problems()
            .await
            .unwrap();

        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(problems.len(), 3);
        assert_eq!(problems[2].id, 3);
    }

    #[tokio::test]
    async fn test_listing_failure_is_fatal() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(403);
            })
            .await;

        let err = client_for(&server).solved_problems().await.unwrap_err();
        assert!(matches!(err, ArchiveError::ApiStatusError { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_fetch_submission_first_try() {
        let server = MockServer::start_async().await;
        let code = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/submissions/latest/")
                    .query_param("qid", "20")
                    .query_param("lang", "java");
                then.status(200)
                    .json_body(serde_json::json!({"code": "class Solution {}"}));
            })
            .await;

        let outcome = client_for(&server)
            .fetch_submission(&problem(20, "Valid Parentheses", "valid-parentheses"))
            .await
            .unwrap();

        code.assert_async().await;
        assert_eq!(
            outcome,
            FetchOutcome::Success(Submission {
                question_id: 20,
                code: "class Solution {}".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_fetch_submission_retries_with_resolved_id() {
        let server = MockServer::start_async().await;
        let wrong_id = server
            .mock_async(|when, then| {
                when.method(GET).path("/submissions/latest/").query_param("qid", "1200");
                then.status(404);
            })
            .await;
        let detail = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/graphql")
                    .body_contains("questionDetail")
                    .body_contains("minimum-absolute-difference");
                then.status(200)
                    .json_body(serde_json::json!({"data": {"question": {"questionId": "42"}}}));
            })
            .await;
        let right_id = server
            .mock_async(|when, then| {
                when.method(GET).path("/submissions/latest/").query_param("qid", "42");
                then.status(200)
                    .json_body(serde_json::json!({"code": "class Solution { }"}));
            })
            .await;

        let outcome = client_for(&server)
            .fetch_submission(&problem(
                1200,
                "Minimum Absolute Difference",
                "minimum-absolute-difference",
            ))
            .await
            .unwrap();

        wrong_id.assert_async().await;
        detail.assert_async().await;
        right_id.assert_async().await;
        match outcome {
            FetchOutcome::Success(submission) => assert_eq!(submission.question_id, 42),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_submission_gives_up_after_one_retry() {
        let server = MockServer::start_async().await;
        let code = server
            .mock_async(|when, then| {
                when.method(GET).path("/submissions/latest/");
                then.status(404);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql").body_contains("questionDetail");
                then.status(200)
                    .json_body(serde_json::json!({"data": {"question": {"questionId": "42"}}}));
            })
            .await;

        let outcome = client_for(&server)
            .fetch_submission(&problem(7, "Reverse Integer", "reverse-integer"))
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::NotFound);
        assert_eq!(code.hits_async().await, 2);
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found_without_retry() {
        let server = MockServer::start_async().await;
        let code = server
            .mock_async(|when, then| {
                when.method(GET).path("/submissions/latest/");
                then.status(404);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql").body_contains("questionDetail");
                then.status(200)
                    .json_body(serde_json::json!({"data": {"question": null}}));
            })
            .await;

        let outcome = client_for(&server)
            .fetch_submission(&problem(7, "Reverse Integer", "reverse-integer"))
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::NotFound);
        assert_eq!(code.hits_async().await, 1);
    }

    #[tokio::test]
    async fn test_detail_lookup_failure_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/submissions/latest/");
                then.status(404);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(500);
            })
            .await;

        let outcome = client_for(&server)
            .fetch_submission(&problem(7, "Reverse Integer", "reverse-integer"))
            .await
            .unwrap();

        assert!(matches!(outcome, FetchOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn test_malformed_code_response_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/submissions/latest/");
                then.status(200).json_body(serde_json::json!({"lang": "java"}));
            })
            .await;

        let result = client_for(&server)
            .fetch_submission(&problem(1, "Two Sum", "two-sum"))
            .await;

        assert!(matches!(result, Err(ArchiveError::ApiError(_))));
    }

    #[test]
    fn test_problem_url() {
        let credentials = Credentials {
            session: "s".to_string(),
            csrf_token: "c".to_string(),
        };
        let client = LeetCodeClient::new("https://leetcode.com/", &credentials, "java").unwrap();
        assert_eq!(
            client.problem_url(&problem(1, "Two Sum", "two-sum")),
            "https://leetcode.com/problems/two-sum/"
        );
    }

    #[test]
    fn test_invalid_header_value_is_a_config_error() {
        let credentials = Credentials {
            session: "bad\nvalue".to_string(),
            csrf_token: "c".to_string(),
        };
        let result = LeetCodeClient::new("https://leetcode.com", &credentials, "java");
        assert!(matches!(
            result,
            Err(ArchiveError::InvalidConfigValueError { .. })
        ));
    }
}
