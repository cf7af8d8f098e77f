use std::sync::Arc;

use reel_domain::StreamingProvider;
use reel_service::{
	Error, Providers, Recommendation, RecommendationRequest, ReelService,
};
use reel_testkit::{
	FailingIndex, FixedEmbedding, ScriptedChat, StaticIndex, init_tracing, movie, test_config,
};

const FRIENDSHIP_CONSTRAINTS: &str =
	r#"{"semantic_search": "friendship", "media": "Movie", "genre": "ALL"}"#;

fn service(chat: Arc<ScriptedChat>, index: Arc<StaticIndex>) -> ReelService {
	init_tracing();

	ReelService::with_providers(
		test_config(),
		Providers {
			chat,
			embedding: Arc::new(FixedEmbedding::new(vec![0.1, 0.2, 0.3, 0.4])),
			index,
		},
	)
}

fn request(user_text: &str) -> RecommendationRequest {
	RecommendationRequest {
		user_text: user_text.to_string(),
		providers: vec![StreamingProvider::Netflix],
	}
}

#[tokio::test]
async fn recommends_from_extracted_constraints() {
	let chat = Arc::new(ScriptedChat::new([FRIENDSHIP_CONSTRAINTS, "31|11"]));
	let index = Arc::new(StaticIndex::new(vec![
		movie(11, "Stand by Me"),
		movie(22, "The Intouchables"),
		movie(31, "Toy Story"),
	]));
	let service = service(chat.clone(), index.clone());

	let outcome = service
		.recommend(request("I'd like to watch a movie about friendship"))
		.await
		.expect("pipeline failed");
	let movies = match outcome {
		Recommendation::Movies(movies) => movies,
		other => panic!("Expected movies, got {other:?}."),
	};
	let ids: Vec<i64> = movies.iter().map(|movie| movie.id).collect();

	assert_eq!(ids, vec![31, 11]);
	assert_eq!(chat.call_count(), 2);

	let searches = index.searches();

	assert_eq!(searches.len(), 1);
	// Provider and vote-count clauses only; genre was "ALL".
	assert_eq!(searches[0].filter.must.len(), 2);
	assert_eq!(searches[0].limit, 10);
	assert_eq!(searches[0].vector, vec![0.1, 0.2, 0.3, 0.4]);
}

#[tokio::test]
async fn requested_genre_reaches_the_store_filter() {
	let chat = Arc::new(ScriptedChat::new([
		r#"{"semantic_search": "heists", "media": "Movie", "genre": "Crime"}"#,
		"17",
	]));
	let index = Arc::new(StaticIndex::new(vec![movie(17, "Heat")]));
	let service = service(chat.clone(), index.clone());

	service.recommend(request("a crime movie about heists")).await.expect("pipeline failed");

	assert_eq!(index.searches()[0].filter.must.len(), 3);
}

#[tokio::test]
async fn surfaces_conversational_replies_verbatim() {
	let refusal = "Sorry, I can only help with movies and TV shows.";
	let chat = Arc::new(ScriptedChat::new([refusal]));
	let index = Arc::new(StaticIndex::new(vec![movie(11, "Stand by Me")]));
	let service = service(chat.clone(), index.clone());

	let outcome = service.recommend(request("what's the weather like?")).await.expect("pipeline failed");

	assert_eq!(outcome, Recommendation::Conversation(refusal.to_string()));
	// The pipeline stops at extraction; the store is never queried.
	assert!(index.searches().is_empty());
	assert_eq!(chat.call_count(), 1);
}

#[tokio::test]
async fn drops_hallucinated_ids_and_keeps_model_order() {
	let chat = Arc::new(ScriptedChat::new([FRIENDSHIP_CONSTRAINTS, "42|17|99"]));
	let index = Arc::new(StaticIndex::new(vec![
		movie(17, "Heat"),
		movie(42, "Ronin"),
		movie(101, "Sneakers"),
	]));
	let service = service(chat, index);

	let outcome = service.recommend(request("something tense")).await.expect("pipeline failed");
	let movies = match outcome {
		Recommendation::Movies(movies) => movies,
		other => panic!("Expected movies, got {other:?}."),
	};
	let ids: Vec<i64> = movies.iter().map(|movie| movie.id).collect();

	assert_eq!(ids, vec![42, 17]);
}

#[tokio::test]
async fn empty_ranking_reply_is_an_empty_selection() {
	let chat = Arc::new(ScriptedChat::new([FRIENDSHIP_CONSTRAINTS, ""]));
	let index = Arc::new(StaticIndex::new(vec![movie(11, "Stand by Me")]));
	let service = service(chat, index);

	let result = service.recommend(request("a movie about friendship")).await;

	assert!(matches!(result, Err(Error::EmptySelection)));
}

#[tokio::test]
async fn empty_candidate_pool_short_circuits_reconciliation() {
	let chat = Arc::new(ScriptedChat::new([FRIENDSHIP_CONSTRAINTS]));
	let index = Arc::new(StaticIndex::new(Vec::new()));
	let service = service(chat.clone(), index);

	let result = service.recommend(request("a movie about friendship")).await;

	assert!(matches!(result, Err(Error::EmptySelection)));
	// Only the extraction call went out; ranking has nothing to rank.
	assert_eq!(chat.call_count(), 1);
}

#[tokio::test]
async fn unknown_extracted_genre_is_a_validation_failure() {
	let chat = Arc::new(ScriptedChat::new([
		r#"{"semantic_search": "space", "media": "Movie", "genre": "Sci-Fi Romance"}"#,
	]));
	let index = Arc::new(StaticIndex::new(vec![movie(11, "Stand by Me")]));
	let service = service(chat, index);

	let result = service.recommend(request("romantic sci-fi")).await;

	assert!(matches!(result, Err(Error::Validation { .. })));
}

#[tokio::test]
async fn rejects_an_empty_provider_selection() {
	let chat = Arc::new(ScriptedChat::new([FRIENDSHIP_CONSTRAINTS]));
	let index = Arc::new(StaticIndex::new(vec![movie(11, "Stand by Me")]));
	let service = service(chat.clone(), index);

	let result = service
		.recommend(RecommendationRequest {
			user_text: "a movie about friendship".to_string(),
			providers: Vec::new(),
		})
		.await;

	assert!(matches!(result, Err(Error::InvalidRequest { .. })));
	assert_eq!(chat.call_count(), 0);
}

#[tokio::test]
async fn authentication_failures_are_distinguished() {
	let chat = Arc::new(ScriptedChat::failing(reel_providers::Error::Authentication {
		status: 401,
	}));
	let index = Arc::new(StaticIndex::new(vec![movie(11, "Stand by Me")]));
	let service = service(chat, index);

	let result = service.recommend(request("a movie about friendship")).await;

	assert!(matches!(result, Err(Error::Authentication)));
}

#[tokio::test]
async fn store_failures_surface_as_retrieval_errors() {
	let chat = Arc::new(ScriptedChat::new([FRIENDSHIP_CONSTRAINTS]));
	let service = ReelService::with_providers(
		test_config(),
		Providers {
			chat,
			embedding: Arc::new(FixedEmbedding::new(vec![0.1, 0.2, 0.3, 0.4])),
			index: Arc::new(FailingIndex { message: "Payload is missing 'title'.".to_string() }),
		},
	);

	let result = service.recommend(request("a movie about friendship")).await;

	assert!(matches!(result, Err(Error::Retrieval { .. })));
}
