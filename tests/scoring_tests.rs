use coursepath::algorithm::scoring::{
    AHEAD_SCORE, CATCH_UP_SCORE, FALLBACK_SCORE, MAX_UNLOCK_WEIGHT, ON_TRACK_SCORE, REASON_AHEAD, REASON_CATCH_UP, REASON_FALLBACK,
    REASON_ON_TRACK, REASON_RETAKE, RETAKE_SCORE,
};
use coursepath::algorithm::{group_by_tier, DependencyGraph, RecommendationEngine, ScoringConfig, UnlockMode};
use coursepath::catalog::{parse_catalog_str, Catalog};
use coursepath::models::{Plan, PriorityTier, StudentProfile};

fn profile(passed: &[&str], failed: &[&str], semester: u32, major: &str) -> StudentProfile {
    StudentProfile::new(
        passed.iter().map(|s| s.to_string()),
        failed.iter().map(|s| s.to_string()),
        semester,
        major,
    )
}

fn abc_catalog() -> Catalog {
    parse_catalog_str(
        r#"[
            {"id": "A", "name": "Alpha", "credits": 3},
            {"id": "B", "name": "Beta", "credits": 3, "prerequisites": ["A"]},
            {"id": "C", "name": "Gamma", "credits": 3, "prerequisites": ["B"]}
        ]"#,
    )
    .expect("Debe parsear el catálogo")
}

#[test]
fn test_cadena_abc_solo_recomienda_b() {
    let catalog = abc_catalog();
    let graph = DependencyGraph::from_catalog(&catalog);
    let engine = RecommendationEngine::new(&catalog, &graph);

    let recs = engine.recommend(&profile(&["A"], &[], 1, ""), &Plan::new());
    let ids: Vec<&str> = recs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["B"]);
}

#[test]
fn test_elegible_aparece_exactamente_una_vez() {
    let catalog = parse_catalog_str(
        r#"[
            {"id": "A", "name": "Alpha", "credits": 3},
            {"id": "B", "name": "Beta", "credits": 3, "prerequisites": ["A"], "semesters_offered": [1, 2]},
            {"id": "D", "name": "Delta", "credits": 2, "prerequisites": ["A"]}
        ]"#,
    )
    .unwrap();
    let graph = DependencyGraph::from_catalog(&catalog);
    let engine = RecommendationEngine::new(&catalog, &graph);

    // B reprobado y atrasado a la vez: sigue saliendo una sola vez
    let recs = engine.recommend(&profile(&["A"], &["B"], 3, ""), &Plan::new());
    assert_eq!(recs.iter().filter(|r| r.id == "B").count(), 1);
    assert_eq!(recs.iter().filter(|r| r.id == "D").count(), 1);
    assert!(recs.iter().all(|r| r.id != "A"));
}

#[test]
fn test_plan_excluye_cursos() {
    let catalog = abc_catalog();
    let graph = DependencyGraph::from_catalog(&catalog);
    let engine = RecommendationEngine::new(&catalog, &graph);

    let plan = Plan::new().with_course("B");
    let recs = engine.recommend(&profile(&["A"], &[], 1, ""), &plan);
    assert!(recs.is_empty());

    // el plan es un valor: quitar el curso devuelve un plan nuevo
    let plan = plan.without_course("B");
    assert_eq!(engine.recommend(&profile(&["A"], &[], 1, ""), &plan).len(), 1);
}

#[test]
fn test_poder_de_desbloqueo_cinco_por_peso() {
    let catalog = parse_catalog_str(
        r#"[
            {"id": "X", "name": "Hub", "credits": 3},
            {"id": "Y", "name": "Leaf", "credits": 3},
            {"id": "D1", "name": "Uno", "credits": 3, "prerequisites": ["X"]},
            {"id": "D2", "name": "Dos", "credits": 3, "prerequisites": ["X"]},
            {"id": "D3", "name": "Tres", "credits": 3, "prerequisites": ["X"]},
            {"id": "D4", "name": "Cuatro", "credits": 3, "prerequisites": ["X"]},
            {"id": "D5", "name": "Cinco", "credits": 3, "prerequisites": ["X"]}
        ]"#,
    )
    .unwrap();
    let graph = DependencyGraph::from_catalog(&catalog);
    let engine = RecommendationEngine::new(&catalog, &graph);
    let weight = engine.config().unlock_weight;
    let p = profile(&[], &[], 1, "");

    let hub = engine.score_course(catalog.get("X").unwrap(), &p);
    let leaf = engine.score_course(catalog.get("Y").unwrap(), &p);
    assert_eq!(hub.score, 5 * weight);
    assert!(hub.score > leaf.score);
    assert!(hub.reasons.iter().any(|r| r == "unlocks 5 follow-on courses"));
    assert_eq!(leaf.score, FALLBACK_SCORE);
    assert_eq!(leaf.reasons, vec![REASON_FALLBACK.to_string()]);

    let direct = RecommendationEngine::new(&catalog, &graph).with_config(ScoringConfig {
        unlock_mode: UnlockMode::Direct,
        unlock_weight: 7,
        ..ScoringConfig::default()
    });
    assert_eq!(direct.score_course(catalog.get("X").unwrap(), &p).score, 35);
}

#[test]
fn test_reprobado_y_atrasado_son_aditivos() {
    let catalog = parse_catalog_str(
        r#"[{"id": "M1", "name": "Mate", "credits": 4, "semesters_offered": [1]}]"#,
    )
    .unwrap();
    let graph = DependencyGraph::from_catalog(&catalog);
    let engine = RecommendationEngine::new(&catalog, &graph);

    let rec = engine.score_course(catalog.get("M1").unwrap(), &profile(&[], &["M1"], 3, ""));
    assert_eq!(rec.score, RETAKE_SCORE + CATCH_UP_SCORE);
    assert_eq!(rec.priority, PriorityTier::Critical);
    assert_eq!(rec.reasons, vec![REASON_RETAKE.to_string(), REASON_CATCH_UP.to_string()]);
}

#[test]
fn test_criterios_de_malla() {
    let catalog = parse_catalog_str(
        r#"{
            "majors": {"CS": {"name": "Computación", "roadmap": {"2": ["ON"], "5": ["FAR"]}}},
            "subjects": [
                {"id": "ON", "name": "On track", "credits": 3},
                {"id": "FAR", "name": "Far ahead", "credits": 3},
                {"id": "OFF", "name": "Offered", "credits": 3, "semesters_offered": [1]}
            ]
        }"#,
    )
    .unwrap();
    let graph = DependencyGraph::from_catalog(&catalog);
    let engine = RecommendationEngine::new(&catalog, &graph);
    let p = profile(&[], &[], 1, "CS");

    let on = engine.score_course(catalog.get("ON").unwrap(), &p);
    assert_eq!(on.score, ON_TRACK_SCORE);
    assert_eq!(on.priority, PriorityTier::Recommended);
    assert_eq!(on.reasons, vec![REASON_ON_TRACK.to_string()]);

    let far = engine.score_course(catalog.get("FAR").unwrap(), &p);
    assert_eq!(far.score, AHEAD_SCORE);
    assert_eq!(far.priority, PriorityTier::Optional);
    assert_eq!(far.reasons, vec![REASON_AHEAD.to_string()]);

    // sin entrada en la malla se usan los semestres en que se dicta
    let off = engine.score_course(catalog.get("OFF").unwrap(), &profile(&[], &[], 2, "CS"));
    assert_eq!(off.score, CATCH_UP_SCORE);
    assert_eq!(off.priority, PriorityTier::Critical);
}

#[test]
fn test_orden_por_score_y_luego_id() {
    let catalog = parse_catalog_str(
        r#"[
            {"id": "Z1", "name": "Zeta", "credits": 3},
            {"id": "A9", "name": "Alfa", "credits": 3},
            {"id": "M5", "name": "Eme", "credits": 3, "semesters_offered": [2]},
            {"id": "R1", "name": "Retake", "credits": 3}
        ]"#,
    )
    .unwrap();
    let graph = DependencyGraph::from_catalog(&catalog);
    let engine = RecommendationEngine::new(&catalog, &graph);

    let recs = engine.recommend(&profile(&[], &["R1"], 1, ""), &Plan::new());
    let ids: Vec<&str> = recs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["R1", "M5", "A9", "Z1"]);
    assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_agrupar_por_prioridad() {
    let catalog = parse_catalog_str(
        r#"[
            {"id": "R1", "name": "Retake", "credits": 3},
            {"id": "N1", "name": "Next", "credits": 3, "semesters_offered": [2]},
            {"id": "E1", "name": "Elective", "credits": 3}
        ]"#,
    )
    .unwrap();
    let graph = DependencyGraph::from_catalog(&catalog);
    let engine = RecommendationEngine::new(&catalog, &graph);

    let recs = engine.recommend(&profile(&[], &["R1"], 1, ""), &Plan::new());
    let groups = group_by_tier(&recs);
    assert_eq!(groups.critical.len(), 1);
    assert_eq!(groups.critical[0].id, "R1");
    assert_eq!(groups.recommended.len(), 1);
    assert_eq!(groups.recommended[0].id, "N1");
    assert_eq!(groups.optional.len(), 1);
    assert_eq!(groups.optional[0].id, "E1");
}

fn hub_catalog() -> Catalog {
    parse_catalog_str(
        r#"[
            {"id": "X", "name": "Hub", "credits": 3},
            {"id": "Y", "name": "Leaf", "credits": 3},
            {"id": "D1", "name": "Uno", "credits": 3, "prerequisites": ["X"]},
            {"id": "D2", "name": "Dos", "credits": 3, "prerequisites": ["X"]}
        ]"#,
    )
    .unwrap()
}

#[test]
fn test_peso_negativo_no_resta_puntaje() {
    let catalog = hub_catalog();
    let graph = DependencyGraph::from_catalog(&catalog);
    let engine = RecommendationEngine::new(&catalog, &graph).with_config(ScoringConfig {
        unlock_weight: -10,
        ..ScoringConfig::default()
    });

    let recs = engine.recommend(&profile(&[], &[], 1, ""), &Plan::new());
    assert!(recs.iter().all(|r| r.score > 0 && !r.reasons.is_empty()));
    let hub = recs.iter().find(|r| r.id == "X").expect("Debe recomendar X");
    assert_eq!(hub.score, FALLBACK_SCORE);
    assert_eq!(hub.reasons, vec![REASON_FALLBACK.to_string()]);
}

#[test]
fn test_peso_enorme_no_desborda() {
    let catalog = hub_catalog();
    let graph = DependencyGraph::from_catalog(&catalog);
    let engine = RecommendationEngine::new(&catalog, &graph).with_config(ScoringConfig {
        unlock_weight: i64::MAX,
        ..ScoringConfig::default()
    });

    let p = profile(&[], &["X"], 3, "");
    let hub = engine.score_course(catalog.get("X").unwrap(), &p);
    assert_eq!(hub.score, RETAKE_SCORE + 2 * MAX_UNLOCK_WEIGHT);
    let leaf = engine.score_course(catalog.get("Y").unwrap(), &p);
    assert!(hub.score > leaf.score);
}
