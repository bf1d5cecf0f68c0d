use coursepath::api_json::*;
use coursepath::catalog::parse_catalog_str;
use coursepath::models::Grade;
use coursepath::AdvisorError;

fn catalog() -> coursepath::Catalog {
    parse_catalog_str(
        r#"[
            {"id": "CS101", "name": "Introducción a la Programación", "credits": 3},
            {"id": "CS102", "name": "Programación Orientada a Objetos", "credits": 3, "prerequisites": ["CS101"]},
            {"id": "MATH101", "name": "Cálculo I", "credits": 4}
        ]"#,
    )
    .expect("Debe parsear el catálogo")
}

#[test]
fn test_parse_recommendation_completa() {
    let json_data = r#"
    {
        "passed": ["CS101"],
        "failed": ["MATH101"],
        "transcript": {"CS102": "B+"},
        "current_semester": 3,
        "major": "CS",
        "planned": ["CS201"],
        "grouped": true
    }
    "#;

    let req = parse_recommendation_request(json_data).expect("Debe parsear la solicitud");
    assert_eq!(req.passed, vec!["CS101"]);
    assert_eq!(req.failed, vec!["MATH101"]);
    assert_eq!(req.current_semester, 3);
    assert_eq!(req.major, "CS");
    assert!(req.grouped);
    let t = req.transcript.expect("Debe haber transcript");
    assert_eq!(t.get("CS102"), Some(&Grade::BPlus));
}

#[test]
fn test_nota_invalida_se_rechaza() {
    let err = parse_recommendation_request(r#"{"current_semester": 1, "transcript": {"CS101": "Z"}}"#)
        .expect_err("Una nota fuera de escala debe fallar");
    assert!(matches!(err, AdvisorError::Json(_)));
    assert!(err.to_string().contains("invalid grade"));
}

#[test]
fn test_perfil_desde_solicitud_resuelve_nombres() {
    let cat = catalog();
    let req = parse_recommendation_request(
        r#"{
            "passed": ["cs101", "Calculo I"],
            "failed": ["CS101"],
            "transcript": {"Programacion Orientada a Objetos": "F"},
            "current_semester": 2,
            "planned": [" MATH101 "]
        }"#,
    )
    .unwrap();

    let (profile, plan) = req.into_profile_and_plan(&cat);
    assert!(profile.passed.contains("CS101"));
    assert!(profile.passed.contains("MATH101"));
    // aprobado y reprobado a la vez: gana aprobado
    assert!(!profile.failed.contains("CS101"));
    assert!(profile.failed.contains("CS102"));
    assert!(plan.contains("MATH101"));
}

#[test]
fn test_resolve_course_id() {
    let cat = catalog();
    assert_eq!(resolve_course_id("CS101", &cat), Some("CS101".to_string()));
    assert_eq!(resolve_course_id("math101", &cat), Some("MATH101".to_string()));
    assert_eq!(resolve_course_id("cálculo i", &cat), Some("MATH101".to_string()));
    assert_eq!(resolve_course_id("Introduccion a la Programacion", &cat), Some("CS101".to_string()));
    assert_eq!(resolve_course_id("Historia del Arte", &cat), None);
    assert_eq!(resolve_course_id("   ", &cat), None);
}

#[test]
fn test_transcript_con_claves_repetidas_conserva_mejor_nota() {
    let cat = catalog();
    let t = [("CS101".to_string(), Grade::F), ("cs101".to_string(), Grade::B)]
        .into_iter()
        .collect();
    let resolved = resolve_transcript(t, &cat);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved.get("CS101"), Some(&Grade::B));
}

#[test]
fn test_goal_request() {
    let cat = catalog();

    let explicit: GoalRequest = serde_json::from_str(
        r#"{"current_gpa": 3.0, "current_credits": 60, "target_gpa": 3.2, "preset": {"preset": "all_a"}}"#,
    )
    .unwrap();
    let goal = explicit.resolve(&cat).expect("Debe resolver la meta");
    assert_eq!(goal.performance, 4.0);
    assert_eq!(goal.current_credits, 60.0);

    let from_transcript: GoalRequest =
        serde_json::from_str(r#"{"transcript": {"CS101": "A", "MATH101": "F"}, "target_gpa": 3.0, "performance": 3.5}"#)
            .unwrap();
    let goal = from_transcript.resolve(&cat).unwrap();
    assert_eq!(goal.current_credits, 7.0);
    assert!((goal.current_gpa - 12.0 / 7.0).abs() < 1e-9);
    assert_eq!(goal.performance, 3.5);

    let missing: GoalRequest = serde_json::from_str(r#"{"current_gpa": 3.0, "target_gpa": 3.2}"#).unwrap();
    assert!(matches!(missing.resolve(&cat), Err(AdvisorError::InvalidInput(_))));

    let negative: GoalRequest =
        serde_json::from_str(r#"{"current_gpa": 3.0, "current_credits": -1, "target_gpa": 3.2}"#).unwrap();
    assert!(negative.resolve(&cat).is_err());
}

#[test]
fn test_easy_wins_request_limite_por_defecto() {
    let req: EasyWinsRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(req.limit(), 4);
    let req: EasyWinsRequest = serde_json::from_str(r#"{"limit": 2}"#).unwrap();
    assert_eq!(req.limit(), 2);
}

fn numbered_catalog() -> coursepath::Catalog {
    parse_catalog_str(
        r#"[
            {"id": "P1", "name": "Physics 1", "credits": 3},
            {"id": "P2", "name": "Physics 2", "credits": 3, "prerequisites": ["P1"]},
            {"id": "M1", "name": "Cálculo I", "credits": 4},
            {"id": "M2", "name": "Cálculo II", "credits": 4, "prerequisites": ["M1"]},
            {"id": "DSA", "name": "Data Structures A", "credits": 3},
            {"id": "DSB", "name": "Data Structures B", "credits": 3}
        ]"#,
    )
    .expect("Debe parsear el catálogo")
}

#[test]
fn test_nombre_con_otro_numero_no_se_resuelve() {
    let cat = numbered_catalog();
    assert_eq!(resolve_course_id("Physics 3", &cat), None);
    assert_eq!(resolve_course_id("Physics3", &cat), None);
    assert_eq!(resolve_course_id("Cálculo IV", &cat), None);
    assert_eq!(resolve_course_id("Calculo III", &cat), None);

    // mismo número: el match aproximado sigue funcionando
    assert_eq!(resolve_course_id("Physic 1", &cat), Some("P1".to_string()));
    assert_eq!(resolve_course_id("Calculos II", &cat), Some("M2".to_string()));
}

#[test]
fn test_empate_entre_candidatos_no_se_resuelve() {
    let cat = numbered_catalog();
    assert_eq!(resolve_course_id("Data Structure", &cat), None);
    assert_eq!(resolve_course_id("Data Structures B", &cat), Some("DSB".to_string()));
}

#[test]
fn test_nombre_desconocido_no_contamina_aprobados() {
    let cat = numbered_catalog();
    let req = parse_recommendation_request(r#"{"passed": ["Physics 3", "Calculo IV"], "current_semester": 2}"#)
        .unwrap();
    let (profile, _) = req.into_profile_and_plan(&cat);
    assert!(!profile.passed.contains("P1"));
    assert!(!profile.passed.contains("M1"));
    assert!(profile.passed.contains("Physics 3"));
    assert!(profile.passed.contains("Calculo IV"));
}
