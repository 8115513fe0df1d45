// ABOUTME: HTTP integration tests for the recipe proxy routes
// ABOUTME: Runs the real router against mocked TheMealDB and Spoonacular upstreams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::axum_test::AxumTestRequest;
use helpers::upstreams::{config_for, router_for, router_with, TEST_API_KEY};
use mockito::{Matcher, Server};
use serde_json::{json, Value};

const MEALDB_CHICKEN: &str = r#"{"meals":[
    {"idMeal":"52772","strMeal":"Teriyaki Chicken Casserole","strMealThumb":"https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg"}
]}"#;

const SPOONACULAR_CHICKEN: &str = r#"[
    {"id":715415,"title":"Red Lentil Soup with Chicken","image":"https://img.spoonacular.com/recipes/715415-312x231.jpg",
     "usedIngredients":[{"name":"chicken"}],"missedIngredients":[{"name":"red lentils"},{"name":"turnips"}],"unusedIngredients":[]}
]"#;

fn api_key() -> Matcher {
    Matcher::UrlEncoded("apiKey".into(), TEST_API_KEY.into())
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_merges_both_providers() {
    let mut server = Server::new_async().await;
    let _mealdb = server
        .mock("GET", "/1/filter.php")
        .match_query(Matcher::UrlEncoded("i".into(), "chicken,rice".into()))
        .with_header("content-type", "application/json")
        .with_body(MEALDB_CHICKEN)
        .create_async()
        .await;
    let _spoonacular = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::AllOf(vec![
            api_key(),
            Matcher::UrlEncoded("ingredients".into(), "chicken,rice".into()),
            Matcher::UrlEncoded("number".into(), "12".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(SPOONACULAR_CHICKEN)
        .create_async()
        .await;

    let response = AxumTestRequest::get("/api/search?ingredients=%20chicken%2C%2C%20rice%20")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["ingredients"], "chicken,rice");
    assert_eq!(body["mealdb"][0]["id"], "52772");
    assert_eq!(body["mealdb"][0]["source"], "mealdb");
    assert_eq!(body["spoonacular"][0]["id"], "715415");
    assert_eq!(
        body["spoonacular"][0]["missedIngredients"],
        json!(["red lentils", "turnips"])
    );
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_search_reports_failing_provider() {
    let mut server = Server::new_async().await;
    let _mealdb = server
        .mock("GET", "/1/filter.php")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body(MEALDB_CHICKEN)
        .create_async()
        .await;
    let _spoonacular = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::Any)
        .with_status(402)
        .with_body(r#"{"status":"failure","message":"daily points limit reached"}"#)
        .create_async()
        .await;

    let response = AxumTestRequest::get("/api/search?ingredients=chicken")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["mealdb"][0]["title"], "Teriyaki Chicken Casserole");
    assert!(body.get("spoonacular").is_none());
    assert!(body["errors"]["spoonacular"].is_string());
    assert!(body["errors"].get("mealdb").is_none());
}

#[tokio::test]
async fn test_search_with_filters_uses_complex_search() {
    let mut server = Server::new_async().await;
    let _mealdb = server
        .mock("GET", "/1/filter.php")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body(r#"{"meals":null}"#)
        .create_async()
        .await;
    let _spoonacular = server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::AllOf(vec![
            api_key(),
            Matcher::UrlEncoded("includeIngredients".into(), "tofu".into()),
            Matcher::UrlEncoded("diet".into(), "vegan".into()),
            Matcher::UrlEncoded("cuisine".into(), "thai".into()),
            Matcher::UrlEncoded("number".into(), "3".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"results":[{"id":1,"title":"Thai Tofu Curry","image":"https://img.spoonacular.com/recipes/1-312x231.jpg",
                "readyInMinutes":30,"servings":2,"sourceUrl":"https://example.com/curry",
                "usedIngredients":[{"name":"tofu"}],"missedIngredients":[]}],"totalResults":1}"#,
        )
        .create_async()
        .await;

    let response =
        AxumTestRequest::get("/api/search?ingredients=tofu&diet=vegan&cuisine=thai&number=3")
            .send(router_for(&server.url()))
            .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert!(body.get("mealdb").is_none());
    assert_eq!(body["spoonacular"][0]["title"], "Thai Tofu Curry");
    assert_eq!(body["spoonacular"][0]["readyInMinutes"], 30);
    assert_eq!(body["spoonacular"][0]["sourceUrl"], "https://example.com/curry");
}

#[tokio::test]
async fn test_search_all_providers_failed() {
    let server = Server::new_async().await;

    let response = AxumTestRequest::get("/api/search?ingredients=chicken")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 502);
    let body: Value = response.json();
    assert_eq!(body["error"], "All recipe providers failed");
    assert!(body["errors"]["mealdb"].is_string());
    assert!(body["errors"]["spoonacular"].is_string());
}

#[tokio::test]
async fn test_search_missing_spoonacular_key_is_reported() {
    let mut server = Server::new_async().await;
    let _mealdb = server
        .mock("GET", "/1/filter.php")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body(MEALDB_CHICKEN)
        .create_async()
        .await;

    let mut config = config_for(&server.url());
    config.spoonacular.api_key = None;
    let response = AxumTestRequest::get("/api/search?ingredients=chicken")
        .send(router_with(config))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert!(body["errors"]["spoonacular"]
        .as_str()
        .unwrap()
        .contains("SPOONACULAR_API_KEY"));
}

#[tokio::test]
async fn test_search_nothing_found() {
    let mut server = Server::new_async().await;
    let _mealdb = server
        .mock("GET", "/1/filter.php")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body(r#"{"meals":null}"#)
        .create_async()
        .await;
    let _spoonacular = server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let response = AxumTestRequest::get("/api/search?ingredients=unobtainium")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "No recipes found");
}

#[tokio::test]
async fn test_search_rejects_blank_ingredients() {
    let server = Server::new_async().await;

    for uri in ["/api/search", "/api/search?ingredients=%20%2C%20"] {
        let response = AxumTestRequest::get(uri)
            .send(router_for(&server.url()))
            .await;
        assert_eq!(response.status(), 400, "{uri}");
        let body: Value = response.json();
        assert_eq!(body["code"], "MISSING_REQUIRED_FIELD");
    }
}

#[tokio::test]
async fn test_search_rejects_bad_number() {
    let server = Server::new_async().await;

    let response = AxumTestRequest::get("/api/search?ingredients=egg&number=lots")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 400);
}

// ============================================================================
// Recipe detail
// ============================================================================

#[tokio::test]
async fn test_mealdb_detail() {
    let mut server = Server::new_async().await;
    let _lookup = server
        .mock("GET", "/1/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "52772".into()))
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"meals":[{"idMeal":"52772","strMeal":"Teriyaki Chicken Casserole",
                "strMealThumb":"https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
                "strCategory":"Chicken","strArea":"Japanese",
                "strInstructions":"Preheat oven to 350.\r\nCombine soy sauce and water.",
                "strTags":"Meat,Casserole","strYoutube":"https://www.youtube.com/watch?v=4aZr5hZXP_s",
                "strIngredient1":"soy sauce","strMeasure1":"3/4 cup",
                "strIngredient2":"chicken breasts","strMeasure2":"2",
                "strIngredient3":"","strMeasure3":" ","strIngredient4":null,"strMeasure4":null}]}"#,
        )
        .create_async()
        .await;

    let response = AxumTestRequest::get("/api/recipes/mealdb/52772")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["title"], "Teriyaki Chicken Casserole");
    assert_eq!(body["area"], "Japanese");
    assert_eq!(body["ingredients"].as_array().unwrap().len(), 2);
    assert_eq!(body["ingredients"][0]["name"], "soy sauce");
    assert_eq!(body["ingredients"][0]["measure"], "3/4 cup");
    assert_eq!(body["steps"].as_array().unwrap().len(), 2);
    assert_eq!(body["tags"], json!(["Meat", "Casserole"]));
}

#[tokio::test]
async fn test_mealdb_detail_not_found() {
    let mut server = Server::new_async().await;
    let _lookup = server
        .mock("GET", "/1/lookup.php")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body(r#"{"meals":null}"#)
        .create_async()
        .await;

    let response = AxumTestRequest::get("/api/recipes/mealdb/99999999")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "Recipe not found");
}

#[tokio::test]
async fn test_spoonacular_detail() {
    let mut server = Server::new_async().await;
    let _information = server
        .mock("GET", "/recipes/716429/information")
        .match_query(api_key())
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id":716429,"title":"Pasta with Garlic","image":"https://img.spoonacular.com/recipes/716429-556x370.jpg",
                "readyInMinutes":45,"servings":2,"sourceUrl":"https://fullbellysisters.blogspot.com/pasta",
                "dishTypes":["lunch","main course"],"cuisines":[],"diets":["dairy free"],
                "instructions":"<ol><li>Boil pasta.</li></ol>",
                "analyzedInstructions":[{"name":"","steps":[{"number":1,"step":"Boil the pasta."},{"number":2,"step":"Add garlic."}]}],
                "extendedIngredients":[{"name":"garlic","amount":2.0,"unit":"cloves","original":"2 cloves garlic"}]}"#,
        )
        .create_async()
        .await;

    let response = AxumTestRequest::get("/api/recipes/spoonacular/716429")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["source"], "spoonacular");
    assert_eq!(body["category"], "lunch");
    assert_eq!(body["steps"], json!(["Boil the pasta.", "Add garlic."]));
    assert_eq!(body["ingredients"][0]["measure"], "2 cloves");
}

#[tokio::test]
async fn test_detail_unknown_source() {
    let server = Server::new_async().await;

    let response = AxumTestRequest::get("/api/recipes/allrecipes/1")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "Recipe not found");
}

#[tokio::test]
async fn test_spoonacular_detail_non_numeric_id() {
    let server = Server::new_async().await;

    let response = AxumTestRequest::get("/api/recipes/spoonacular/not-a-number")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 404);
}

// ============================================================================
// Cuisines, random and passthroughs
// ============================================================================

#[tokio::test]
async fn test_cuisines_list() {
    let mut server = Server::new_async().await;
    let _areas = server
        .mock("GET", "/1/list.php")
        .match_query(Matcher::UrlEncoded("a".into(), "list".into()))
        .with_header("content-type", "application/json")
        .with_body(r#"{"meals":[{"strArea":"American"},{"strArea":"British"},{"strArea":"Japanese"}]}"#)
        .create_async()
        .await;

    let response = AxumTestRequest::get("/api/cuisines")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["cuisines"], json!(["American", "British", "Japanese"]));
}

#[tokio::test]
async fn test_cuisine_recipes() {
    let mut server = Server::new_async().await;
    let _area = server
        .mock("GET", "/1/filter.php")
        .match_query(Matcher::UrlEncoded("a".into(), "Japanese".into()))
        .with_header("content-type", "application/json")
        .with_body(MEALDB_CHICKEN)
        .create_async()
        .await;

    let response = AxumTestRequest::get("/api/cuisines/Japanese")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["area"], "Japanese");
    assert_eq!(body["recipes"][0]["id"], "52772");
}

#[tokio::test]
async fn test_unknown_cuisine() {
    let mut server = Server::new_async().await;
    let _area = server
        .mock("GET", "/1/filter.php")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body(r#"{"meals":null}"#)
        .create_async()
        .await;

    let response = AxumTestRequest::get("/api/cuisines/Atlantean")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_random_with_one_provider_down() {
    let mut server = Server::new_async().await;
    let _random = server
        .mock("GET", "/1/random.php")
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"meals":[{"idMeal":"53049","strMeal":"Apam balik","strMealThumb":"https://www.themealdb.com/images/media/meals/adxcbq1619787919.jpg","strArea":"Malaysian"}]}"#,
        )
        .create_async()
        .await;

    let response = AxumTestRequest::get("/api/random")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["mealdb"]["title"], "Apam balik");
    assert!(body.get("spoonacular").is_none());
    assert!(body["errors"]["spoonacular"].is_string());
}

#[tokio::test]
async fn test_random_all_providers_failed() {
    let server = Server::new_async().await;

    let response = AxumTestRequest::get("/api/random")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 502);
    let body: Value = response.json();
    assert!(body["errors"]["mealdb"].is_string());
}

#[tokio::test]
async fn test_random_with_nothing_returned_is_not_found() {
    let mut server = Server::new_async().await;
    let _mealdb = server
        .mock("GET", "/1/random.php")
        .with_header("content-type", "application/json")
        .with_body(r#"{"meals":null}"#)
        .create_async()
        .await;
    let _spoonacular = server
        .mock("GET", "/recipes/random")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body(r#"{"recipes":[]}"#)
        .create_async()
        .await;

    let response = AxumTestRequest::get("/api/random")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "No recipes found");
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_mealdb_name_search() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", "/1/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), "Arrabiata".into()))
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"meals":[{"idMeal":"52771","strMeal":"Spicy Arrabiata Penne","strMealThumb":"https://www.themealdb.com/images/media/meals/ustsqw1468250014.jpg"}]}"#,
        )
        .create_async()
        .await;

    let response = AxumTestRequest::get("/api/mealdb/search?q=Arrabiata")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["recipes"][0]["title"], "Spicy Arrabiata Penne");
}

#[tokio::test]
async fn test_autocomplete() {
    let mut server = Server::new_async().await;
    let _autocomplete = server
        .mock("GET", "/recipes/autocomplete")
        .match_query(Matcher::AllOf(vec![
            api_key(),
            Matcher::UrlEncoded("query".into(), "chick".into()),
            Matcher::UrlEncoded("number".into(), "10".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":42,"title":"chicken curry","imageType":"jpg"}]"#)
        .create_async()
        .await;

    let response = AxumTestRequest::get("/api/spoonacular/autocomplete?query=chick")
        .send(router_for(&server.url()))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["suggestions"], json!([{"id": 42, "title": "chicken curry"}]));
}
