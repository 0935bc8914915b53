//! Integration tests for the pipeline.
//!
//! These tests run CSV rows through the join, normalization, vectorization
//! and similarity stages together.

use data_loader::{CreditRow, MovieRow, RawCorpus};
use pipeline::{Model, PipelineConfig};

fn movie(id: u32, title: &str, overview: &str, genres: &str, keywords: &str) -> MovieRow {
    MovieRow {
        id: Some(id),
        title: Some(title.to_string()),
        overview: Some(overview.to_string()),
        genres: Some(genres.to_string()),
        keywords: Some(keywords.to_string()),
    }
}

fn credit(title: &str, cast: &str, crew: &str) -> CreditRow {
    CreditRow {
        movie_id: None,
        title: Some(title.to_string()),
        cast: Some(cast.to_string()),
        crew: Some(crew.to_string()),
    }
}

fn create_test_corpus() -> RawCorpus {
    let movies = vec![
        movie(
            1,
            "2001: A Space Odyssey",
            "Astronauts travel to Jupiter with a rogue computer",
            r#"[{"id": 878, "name": "Science Fiction"}]"#,
            r#"[{"id": 1, "name": "artificial intelligence"}, {"id": 2, "name": "space travel"}]"#,
        ),
        movie(
            2,
            "The Shining",
            "A writer takes a job as winter caretaker of a hotel",
            r#"[{"id": 27, "name": "Horror"}]"#,
            r#"[{"id": 3, "name": "hotel"}]"#,
        ),
        movie(
            3,
            "Solaris",
            "A psychologist travels to a space station orbiting a strange planet",
            r#"[{"id": 878, "name": "Science Fiction"}]"#,
            "{broken",
        ),
        movie(4, "Orphan", "", "[]", "[]"),
    ];

    let credits = vec![
        credit(
            "2001: A Space Odyssey",
            r#"[{"name": "Keir Dullea"}, {"name": "Gary Lockwood"}]"#,
            r#"[{"name": "Stanley Kubrick", "job": "Director"}, {"name": "Ray Lovejoy", "job": "Editor"}]"#,
        ),
        credit(
            "The Shining",
            r#"[{"name": "Jack Nicholson"}, {"name": "Shelley Duvall"}]"#,
            r#"[{"name": "Stanley Kubrick", "job": "Director"}]"#,
        ),
        credit(
            "Solaris",
            r#"[{"name": "Donatas Banionis"}]"#,
            r#"[{"name": "Andrei Tarkovsky", "job": "Director"}]"#,
        ),
        credit("Orphan", "[]", "[]"),
    ];

    RawCorpus::join(&movies, &credits)
}

#[test]
fn test_incomplete_rows_never_reach_the_model() {
    let corpus = create_test_corpus();
    let model = Model::build(&corpus, &PipelineConfig::default()).unwrap();

    assert_eq!(model.movies().len(), 3);
    assert!(model.movies().find_by_title("Orphan").is_none());
}

#[test]
fn test_collapsed_names_are_single_features() {
    let model = Model::build(&create_test_corpus(), &PipelineConfig::default()).unwrap();
    let vocabulary = model.vocabulary();

    assert!(vocabulary.position("StanleyKubrick").is_some());
    assert!(vocabulary.position("ScienceFiction").is_some());
    assert!(vocabulary.position("Stanley").is_none());
    // Editor is not a director
    assert!(vocabulary.position("RayLovejoy").is_none());
}

#[test]
fn test_similarity_properties_hold() {
    let model = Model::build(&create_test_corpus(), &PipelineConfig::default()).unwrap();
    let sim = model.similarity();

    for i in 0..sim.len() {
        assert_eq!(sim.get(i, i), Some(1.0));
        for j in 0..sim.len() {
            let v = sim.get(i, j).unwrap();
            assert!((0.0..=1.0).contains(&v));
            assert_eq!(v, sim.get(j, i).unwrap());
        }
    }
}

#[test]
fn test_small_vocabulary_bound() {
    let config = PipelineConfig {
        max_features: 4,
        ..PipelineConfig::default()
    };
    let model = Model::build(&create_test_corpus(), &config).unwrap();

    assert!(model.vocabulary().len() <= 4);
    assert_eq!(model.similarity().len(), 3);
}
