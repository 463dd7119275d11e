//! Hosted inference backend for the sentiment and zero-shot models.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::InferenceConfig;
use crate::errors::ClassifierError;
use crate::sentiment::{SentimentLabel, SentimentModel, SentimentScore, ZeroShotModel};

/// Blocking HTTP client for a Hugging Face style inference API
/// (`POST {base_url}/models/{model}`).
#[derive(Clone)]
pub struct InferenceClient {
    base_url: String,
    sentiment_model: String,
    zero_shot_model: String,
    multi_label: bool,
    api_token: Option<String>,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl std::fmt::Debug for InferenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceClient")
            .field("base_url", &self.base_url)
            .field("sentiment_model", &self.sentiment_model)
            .field("zero_shot_model", &self.zero_shot_model)
            .field("has_token", &self.api_token.is_some())
            .finish()
    }
}

impl InferenceClient {
    pub fn from_config(config: &InferenceConfig) -> Result<Self, ClassifierError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClassifierError::Unavailable(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sentiment_model: config.sentiment_model.clone(),
            zero_shot_model: config.zero_shot_model.clone(),
            multi_label: config.multi_label,
            api_token: config.resolved_api_token(),
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url, model)
    }

    fn post<B: Serialize>(&self, model: &str, body: &B) -> Result<String, ClassifierError> {
        let mut request = self.client.post(self.model_url(model)).json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| {
            if e.is_connect() {
                ClassifierError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                ClassifierError::Timeout(self.timeout_secs)
            } else {
                ClassifierError::Unavailable(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClassifierError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .text()
            .map_err(|e| ClassifierError::ResponseParsing(e.to_string()))
    }
}

#[derive(Serialize)]
struct SentimentRequest<'a> {
    inputs: &'a str,
}

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [&'a str],
    multi_label: bool,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SentimentResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Ranked { labels: Vec<String>, scores: Vec<f64> },
    Scored(Vec<LabelScore>),
}

fn best(scores: Vec<LabelScore>) -> Option<LabelScore> {
    scores.into_iter().fold(None, |best, candidate| match best {
        Some(b) if b.score >= candidate.score => Some(b),
        _ => Some(candidate),
    })
}

pub(crate) fn parse_sentiment(body: &str) -> Result<SentimentScore, ClassifierError> {
    let response: SentimentResponse =
        serde_json::from_str(body).map_err(|e| ClassifierError::ResponseParsing(e.to_string()))?;
    let scores = match response {
        SentimentResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
        SentimentResponse::Flat(scores) => scores,
    };

    let top = best(scores)
        .ok_or_else(|| ClassifierError::ResponseParsing("no sentiment scores".to_string()))?;
    let label = SentimentLabel::parse(&top.label).ok_or_else(|| {
        ClassifierError::ResponseParsing(format!("unknown sentiment label {:?}", top.label))
    })?;
    Ok(SentimentScore::new(label, top.score))
}

/// Labels ordered best first.
pub(crate) fn parse_zero_shot(body: &str) -> Result<Vec<String>, ClassifierError> {
    let response: ZeroShotResponse =
        serde_json::from_str(body).map_err(|e| ClassifierError::ResponseParsing(e.to_string()))?;

    let mut pairs: Vec<(String, f64)> = match response {
        ZeroShotResponse::Ranked { labels, scores } => {
            if labels.len() != scores.len() {
                return Err(ClassifierError::ResponseParsing(format!(
                    "{} labels but {} scores",
                    labels.len(),
                    scores.len()
                )));
            }
            labels.into_iter().zip(scores).collect()
        }
        ZeroShotResponse::Scored(scores) => {
            scores.into_iter().map(|s| (s.label, s.score)).collect()
        }
    };
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1));

    Ok(pairs.into_iter().map(|(label, _)| label).collect())
}

impl SentimentModel for InferenceClient {
    fn classify(&self, text: &str) -> Result<SentimentScore, ClassifierError> {
        let body = self.post(&self.sentiment_model, &SentimentRequest { inputs: text })?;
        parse_sentiment(&body)
    }
}

impl ZeroShotModel for InferenceClient {
    fn rank(&self, text: &str, candidate_labels: &[&str]) -> Result<Vec<String>, ClassifierError> {
        let request = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels,
                multi_label: self.multi_label,
            },
        };
        let body = self.post(&self.zero_shot_model, &request)?;
        parse_zero_shot(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::INTENT_LABELS;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    fn local_client(base_url: String, timeout_secs: u64) -> InferenceClient {
        let config = InferenceConfig {
            base_url,
            timeout_secs,
            ..InferenceConfig::default()
        };
        InferenceClient::from_config(&config).unwrap()
    }

    /// Read one request: headers, then `Content-Length` bytes of body.
    fn read_request(stream: &mut TcpStream) -> String {
        let mut received = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).unwrap_or(0);
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&received).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if received.len() >= header_end + 4 + content_length {
                    return text;
                }
            }
        }
        String::from_utf8_lossy(&received).to_string()
    }

    /// Serve a single canned response and hand back the request text.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });
        (base_url, handle)
    }

    #[test]
    fn posts_to_the_model_and_parses_the_reply() {
        let (base_url, server) = serve_once("200 OK", r#"[[{"label":"POSITIVE","score":0.9}]]"#);
        let client = local_client(base_url, 5);

        let score = client.classify("I feel fine").unwrap();
        assert_eq!(score, SentimentScore::new(SentimentLabel::Positive, 0.9));

        let request = server.join().unwrap();
        assert!(request.starts_with(
            "POST /models/distilbert-base-uncased-finetuned-sst-2-english "
        ));
        assert!(request.ends_with(r#"{"inputs":"I feel fine"}"#));
    }

    #[test]
    fn non_success_status_is_an_http_error() {
        let (base_url, server) = serve_once("503 Service Unavailable", "loading");
        let client = local_client(base_url, 5);

        let err = client.classify("anything").unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::Http { status: 503, ref body } if body == "loading"
        ));
        server.join().unwrap();
    }

    #[test]
    fn unparsable_reply_is_a_parsing_error() {
        let (base_url, server) = serve_once("200 OK", "<html>busy</html>");
        let client = local_client(base_url, 5);

        assert!(matches!(
            client.rank("anything", &INTENT_LABELS),
            Err(ClassifierError::ResponseParsing(_))
        ));
        server.join().unwrap();
    }

    #[test]
    fn refused_connection_is_a_connection_error() {
        let base_url = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };
        let client = local_client(base_url.clone(), 5);

        assert!(matches!(
            client.classify("anything"),
            Err(ClassifierError::Connection(url)) if url == base_url
        ));
    }

    #[test]
    fn silent_server_is_a_timeout() {
        // accepted by the OS backlog, never answered
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let client = local_client(format!("http://{}", listener.local_addr().unwrap()), 1);

        assert!(matches!(
            client.classify("anything"),
            Err(ClassifierError::Timeout(1))
        ));
        drop(listener);
    }

    #[test]
    fn client_trims_trailing_slash() {
        let config = InferenceConfig {
            base_url: "http://localhost:8080/".to_string(),
            timeout_secs: 5,
            ..InferenceConfig::default()
        };
        let client = InferenceClient::from_config(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.timeout_secs, 5);
        assert_eq!(
            client.model_url("facebook/bart-large-mnli"),
            "http://localhost:8080/models/facebook/bart-large-mnli"
        );
    }

    #[test]
    fn parses_nested_sentiment() {
        let score = parse_sentiment(
            r#"[[{"label":"NEGATIVE","score":0.97},{"label":"POSITIVE","score":0.03}]]"#,
        )
        .unwrap();
        assert_eq!(score, SentimentScore::new(SentimentLabel::Negative, 0.97));
    }

    #[test]
    fn parses_flat_sentiment_picking_highest() {
        let score = parse_sentiment(
            r#"[{"label":"NEGATIVE","score":0.2},{"label":"POSITIVE","score":0.8}]"#,
        )
        .unwrap();
        assert_eq!(score.label, SentimentLabel::Positive);
    }

    #[test]
    fn rejects_unknown_sentiment_payloads() {
        assert!(matches!(
            parse_sentiment(r#"{"error":"Model is loading"}"#),
            Err(ClassifierError::ResponseParsing(_))
        ));
        assert!(matches!(
            parse_sentiment(r#"[{"label":"LABEL_0","score":0.9}]"#),
            Err(ClassifierError::ResponseParsing(_))
        ));
        assert!(matches!(
            parse_sentiment("[]"),
            Err(ClassifierError::ResponseParsing(_))
        ));
    }

    #[test]
    fn parses_ranked_zero_shot() {
        let labels = parse_zero_shot(
            r#"{"sequence":"I hope it gets better","labels":["Seeking reassurance","Expressing concern"],"scores":[0.7,0.3]}"#,
        )
        .unwrap();
        assert_eq!(labels, vec!["Seeking reassurance", "Expressing concern"]);
    }

    #[test]
    fn parses_scored_zero_shot_in_score_order() {
        let labels = parse_zero_shot(
            r#"[{"label":"Providing history","score":0.1},{"label":"Reporting symptoms","score":0.6}]"#,
        )
        .unwrap();
        assert_eq!(labels, vec!["Reporting symptoms", "Providing history"]);
    }

    #[test]
    fn mismatched_zero_shot_lengths_are_rejected() {
        assert!(matches!(
            parse_zero_shot(r#"{"labels":["a","b"],"scores":[1.0]}"#),
            Err(ClassifierError::ResponseParsing(_))
        ));
    }

    #[test]
    fn zero_shot_request_shape() {
        let labels = ["a", "b"];
        let request = ZeroShotRequest {
            inputs: "text",
            parameters: ZeroShotParameters {
                candidate_labels: &labels,
                multi_label: false,
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "inputs": "text",
                "parameters": {"candidate_labels": ["a", "b"], "multi_label": false}
            })
        );
    }
}
