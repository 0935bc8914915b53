//! End-to-end: raw records through the pipeline into recommendation queries.

use data_loader::{CreditRow, MovieRow, RawCorpus, RawMovie};
use pipeline::{Model, PipelineConfig};
use recommender::{QueryError, Recommender};
use std::sync::Arc;
use std::thread;

fn raw(id: u32, title: &str, overview: &str, keywords: &str, director: &str) -> RawMovie {
    RawMovie {
        id,
        title: title.to_string(),
        overview: overview.to_string(),
        genres: "[]".to_string(),
        keywords: keywords.to_string(),
        cast: "[]".to_string(),
        crew: format!(r#"[{{"name": "{director}", "job": "Director"}}]"#),
    }
}

fn build(movies: Vec<RawMovie>) -> Arc<Model> {
    let corpus = RawCorpus::from_movies(movies);
    Arc::new(Model::build(&corpus, &PipelineConfig::default()).unwrap())
}

#[test]
fn test_more_shared_tokens_rank_higher() {
    let model = build(vec![
        raw(1, "A", "submarine captain ocean mutiny", "[]", "Jane Roe"),
        raw(2, "B", "submarine captain ocean storm", "[]", "Jane Roe"),
        raw(3, "C", "desert caravan ocean", "[]", "John Doe"),
    ]);
    let recommender = Recommender::new(model);

    let results = recommender.recommend(1).unwrap();
    let ids: Vec<u32> = results.iter().map(|r| r.movie_id).collect();

    assert_eq!(ids, vec![2, 3]);
    assert!(results[0].score > results[1].score);
}

#[test]
fn test_five_results_excluding_query() {
    let movies = (1..=8)
        .map(|id| {
            raw(
                id,
                &format!("Movie {id}"),
                &format!("heist crew vault plan{id}"),
                r#"[{"id": 1, "name": "bank robbery"}]"#,
                "Some Director",
            )
        })
        .collect();
    let recommender = Recommender::new(build(movies));

    let results = recommender.recommend(4).unwrap();

    assert_eq!(results.len(), 5);
    assert!(results.iter().all(|r| r.movie_id != 4));
    // All candidates score the same, so corpus order decides
    let ids: Vec<u32> = results.iter().map(|r| r.movie_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 5, 6]);
}

#[test]
fn test_unknown_title_distinct_from_no_results() {
    let recommender = Recommender::new(build(vec![raw(1, "Only", "lonely movie", "[]", "X Y")]));

    assert_eq!(recommender.recommend_by_title("Only").unwrap(), vec![]);
    assert!(matches!(
        recommender.recommend_by_title("Other"),
        Err(QueryError::TitleNotFound { .. })
    ));
    assert_eq!(recommender.recommend(2), Err(QueryError::NotFound { id: 2 }));
}

#[test]
fn test_shared_title_yields_one_row_per_id() {
    let movie = |id: u32, title: &str, overview: &str| MovieRow {
        id: Some(id),
        title: Some(title.to_string()),
        overview: Some(overview.to_string()),
        genres: Some("[]".to_string()),
        keywords: Some("[]".to_string()),
    };
    let credit = |title: &str, cast: &str| CreditRow {
        movie_id: None,
        title: Some(title.to_string()),
        cast: Some(cast.to_string()),
        crew: Some("[]".to_string()),
    };
    let movies = vec![
        movie(10, "The Host", "monster river city"),
        movie(11, "The Host", "alien parasite body"),
        movie(12, "Okja", "giant pig friendship"),
    ];
    let credits = vec![
        credit("The Host", r#"[{"name": "Song Kangho"}]"#),
        credit("The Host", r#"[{"name": "Saoirse Ronan"}]"#),
        credit("Okja", r#"[{"name": "Ahn Seohyun"}]"#),
    ];

    let corpus = RawCorpus::join(&movies, &credits);
    let corpus_ids: Vec<u32> = corpus.movies().iter().map(|m| m.id).collect();
    assert_eq!(corpus_ids, vec![10, 11, 12]);

    let model = Arc::new(Model::build(&corpus, &PipelineConfig::default()).unwrap());
    let recommender = Recommender::new(model);

    for id in [10, 11, 12] {
        let ids: Vec<u32> = recommender
            .recommend(id)
            .unwrap()
            .iter()
            .map(|r| r.movie_id)
            .collect();
        assert!(!ids.contains(&id));
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }
}

#[test]
fn test_concurrent_reads() {
    let model = build(vec![
        raw(1, "A", "space station", "[]", "P Q"),
        raw(2, "B", "space shuttle", "[]", "P Q"),
        raw(3, "C", "jungle river", "[]", "R S"),
    ]);
    let recommender = Recommender::new(model);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let recommender = recommender.clone();
            thread::spawn(move || recommender.recommend(1).unwrap())
        })
        .collect();

    let expected = recommender.recommend(1).unwrap();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
