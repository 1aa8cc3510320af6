//! REST API for wordvec.
//!
//! Provides a stateless HTTP server with JSON endpoints for embedding
//! queries. Each request includes a `model` field specifying the model file
//! path. The server loads the model from disk per request; queries never
//! mutate it, so nothing is written back.
//!
//! ## Endpoints
//!
//! - `POST /lookup` - Resolve words to their stored vectors
//! - `POST /similarity` - Cosine similarity between word pairs
//! - `POST /most_similar` - Nearest neighbors of query words
//! - `POST /analogy` - Nearest neighbors of a positive/negative combination
//!
//! ## Usage
//!
//! ```rust,no_run
//! use actix_web::{App, HttpServer};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     HttpServer::new(|| App::new().configure(wordvec::server::config))
//!         .bind("0.0.0.0:7878")?
//!         .run()
//!         .await
//! }
//! ```

use actix_web::{web, HttpResponse, Responder};
use serde::{Serialize, Deserialize};
use crate::Model;

fn default_n() -> usize {
    10
}

// --- Request structs ---

#[derive(Deserialize)]
struct LookupRequest {
    model: String,
    words: Vec<String>,
}

#[derive(Deserialize)]
struct WordPair {
    word1: String,
    word2: String,
}

#[derive(Deserialize)]
struct SimilarityRequest {
    model: String,
    pairs: Vec<WordPair>,
}

#[derive(Deserialize)]
struct MostSimilarQuery {
    words: Vec<String>,
    #[serde(default = "default_n")]
    n: usize,
    #[serde(default)]
    exclude: Vec<String>,
}

#[derive(Deserialize)]
struct MostSimilarRequest {
    model: String,
    queries: Vec<MostSimilarQuery>,
}

#[derive(Deserialize)]
struct AnalogyQuery {
    positive: Vec<String>,
    negative: Vec<String>,
    #[serde(default = "default_n")]
    n: usize,
}

#[derive(Deserialize)]
struct AnalogyRequest {
    model: String,
    queries: Vec<AnalogyQuery>,
}

// --- Response structs ---

#[derive(Serialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Serialize)]
struct LookupResult {
    word: String,
    values: Option<Vec<f32>>,
}

#[derive(Serialize)]
struct SimilarityResponse {
    results: Vec<SimilarityResult>,
}

#[derive(Serialize)]
struct SimilarityResult {
    word1: String,
    word2: String,
    score: Option<f32>,
}

#[derive(Serialize)]
struct MatchResult {
    word: String,
    score: f32,
}

#[derive(Serialize)]
struct MostSimilarResponse {
    results: Vec<MostSimilarResultGroup>,
}

#[derive(Serialize)]
struct MostSimilarResultGroup {
    lists: Vec<Vec<MatchResult>>,
    message: String,
}

#[derive(Serialize)]
struct AnalogyResponse {
    results: Vec<AnalogyResultGroup>,
}

#[derive(Serialize)]
struct AnalogyResultGroup {
    matches: Vec<MatchResult>,
    message: String,
}

// --- Handlers ---

async fn lookup_handler(body: web::Json<LookupRequest>) -> impl Responder {
    let model = match Model::load(&body.model) {
        Ok(model) => model,
        Err(e) => return HttpResponse::InternalServerError().json(serde_json::json!({"error": e})),
    };

    let words: Vec<&str> = body.words.iter().map(String::as_str).collect();
    let results = model
        .lookup_batch(&words)
        .iter()
        .zip(body.words.iter())
        .map(|(found, word)| LookupResult {
            word: word.clone(),
            values: found.map(|wv| wv.values.clone()),
        })
        .collect();

    HttpResponse::Ok().json(LookupResponse { results })
}

async fn similarity_handler(body: web::Json<SimilarityRequest>) -> impl Responder {
    let model = match Model::load(&body.model) {
        Ok(model) => model,
        Err(e) => return HttpResponse::InternalServerError().json(serde_json::json!({"error": e})),
    };

    let results = body
        .pairs
        .iter()
        .map(|pair| SimilarityResult {
            word1: pair.word1.clone(),
            word2: pair.word2.clone(),
            score: model.similarity(&pair.word1, &pair.word2),
        })
        .collect();

    HttpResponse::Ok().json(SimilarityResponse { results })
}

async fn most_similar_handler(body: web::Json<MostSimilarRequest>) -> impl Responder {
    let model = match Model::load(&body.model) {
        Ok(model) => model,
        Err(e) => return HttpResponse::InternalServerError().json(serde_json::json!({"error": e})),
    };

    let mut results = Vec::new();

    for entry in &body.queries {
        let words: Vec<&str> = entry.words.iter().map(String::as_str).collect();
        let exclude: Vec<&str> = entry.exclude.iter().map(String::as_str).collect();

        match model.most_similar(&words, entry.n, &exclude) {
            Ok(lists) => {
                results.push(MostSimilarResultGroup {
                    lists: lists
                        .into_iter()
                        .map(|list| {
                            list.into_iter()
                                .map(|d| MatchResult { word: d.word, score: d.score })
                                .collect()
                        })
                        .collect(),
                    message: "Query Success".to_string(),
                });
            }
            Err(e) => {
                results.push(MostSimilarResultGroup {
                    lists: Vec::new(),
                    message: e,
                });
            }
        }
    }

    HttpResponse::Ok().json(MostSimilarResponse { results })
}

async fn analogy_handler(body: web::Json<AnalogyRequest>) -> impl Responder {
    let model = match Model::load(&body.model) {
        Ok(model) => model,
        Err(e) => return HttpResponse::InternalServerError().json(serde_json::json!({"error": e})),
    };

    let mut results = Vec::new();

    for entry in &body.queries {
        let positive: Vec<&str> = entry.positive.iter().map(String::as_str).collect();
        let negative: Vec<&str> = entry.negative.iter().map(String::as_str).collect();

        match model.analogy(&positive, &negative, entry.n) {
            Ok(matches) => {
                results.push(AnalogyResultGroup {
                    matches: matches
                        .into_iter()
                        .map(|d| MatchResult { word: d.word, score: d.score })
                        .collect(),
                    message: "Query Success".to_string(),
                });
            }
            Err(e) => {
                results.push(AnalogyResultGroup {
                    matches: Vec::new(),
                    message: e,
                });
            }
        }
    }

    HttpResponse::Ok().json(AnalogyResponse { results })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/lookup").route(web::post().to(lookup_handler)))
       .service(web::resource("/similarity").route(web::post().to(similarity_handler)))
       .service(web::resource("/most_similar").route(web::post().to(most_similar_handler)))
       .service(web::resource("/analogy").route(web::post().to(analogy_handler)));
}
