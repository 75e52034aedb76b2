use alquran_lib::models::{
    Ayah, Edition, Meta, Quran, SajdaAyahs, SearchResults, SectionText, Surah, SurahReference,
};
use alquran_lib::pages::{Dashboard, Hero, HeroService, HomePage, HomeView, StaticPage, GAME};
use alquran_lib::{
    init_tracing, ClientArgs, ClientConfig, EditionFilter, Pagination, QuranClient, RequestError,
    SectionKind, SortDirection,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Redirect,
    routing::get,
    Json, Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// HTTP surface over the alquran.cloud API and the page models.
#[derive(Parser)]
#[command(name = "alquran-api")]
struct Args {
    /// Address to bind the server to.
    #[arg(long, default_value = "127.0.0.1:3000", env = "ALQURAN_BIND")]
    bind: SocketAddr,

    #[command(flatten)]
    client: ClientArgs,
}

struct AppState {
    client: QuranClient,
    heroes: HeroService,
}

// === Request/Response types ===

#[derive(Deserialize)]
struct HomeQuery {
    lang: Option<String>,
    edition: Option<String>,
    filter: Option<String>,
    sort: Option<String>,
    dir: Option<SortDirection>,
    page: Option<usize>,
    page_size: Option<usize>,
}

#[derive(Deserialize)]
struct HeroQuery {
    name: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    upstream: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn upstream_error(e: RequestError) -> ApiError {
    tracing::warn!(error = %e, "Upstream request failed");
    (StatusCode::BAD_GATEWAY, Json(ErrorResponse { error: e.to_string() }))
}

// === Page handlers ===

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        upstream: state.client.base_url().to_string(),
    })
}

async fn home(State(state): State<Arc<AppState>>, Query(params): Query<HomeQuery>) -> Json<HomeView> {
    let mut page = match &params.lang {
        Some(lang) => HomePage::with_language(lang),
        None => HomePage::new(),
    };
    let alerts = page.mount(&state.client).await;

    if let Some(edition) = &params.edition {
        page.select_edition(edition);
    }
    let table = page.table_mut();
    if let Some(column) = &params.sort {
        table.sort_by(column, params.dir.unwrap_or(SortDirection::Asc));
    }
    if let Some(size) = params.page_size {
        table.set_page_size(size);
    }
    if let Some(filter) = &params.filter {
        table.set_filter(filter);
    }
    if let Some(index) = params.page {
        table.set_page(index);
    }

    Json(page.view(&alerts))
}

async fn dashboard() -> Json<Dashboard> {
    Json(Dashboard::default())
}

async fn game() -> Json<StaticPage> {
    Json(GAME)
}

async fn heroes(State(state): State<Arc<AppState>>, Query(params): Query<HeroQuery>) -> Json<Vec<Hero>> {
    match params.name {
        Some(name) => Json(state.heroes.search(&name)),
        None => Json(state.heroes.heroes()),
    }
}

async fn hero_detail(State(state): State<Arc<AppState>>, Path(id): Path<u32>) -> ApiResult<Hero> {
    state.heroes.hero(id).map(Json).ok_or_else(|| {
        (StatusCode::NOT_FOUND, Json(ErrorResponse { error: format!("No hero with id {}", id) }))
    })
}

// === Upstream read-through handlers ===

async fn editions(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<EditionFilter>,
) -> ApiResult<Vec<Edition>> {
    state.client.editions(filter).await.map(Json).map_err(upstream_error)
}

async fn languages(State(state): State<Arc<AppState>>) -> ApiResult<Vec<String>> {
    state.client.languages().await.map(Json).map_err(upstream_error)
}

async fn editions_for_language(
    State(state): State<Arc<AppState>>,
    Path(lang): Path<String>,
) -> ApiResult<Vec<Edition>> {
    state.client.editions_for_language(&lang).await.map(Json).map_err(upstream_error)
}

async fn edition_types(State(state): State<Arc<AppState>>) -> ApiResult<Vec<String>> {
    state.client.edition_types().await.map(Json).map_err(upstream_error)
}

async fn editions_for_type(
    State(state): State<Arc<AppState>>,
    Path(edition_type): Path<String>,
) -> ApiResult<Vec<Edition>> {
    state.client.editions_for_type(&edition_type).await.map(Json).map_err(upstream_error)
}

async fn formats(State(state): State<Arc<AppState>>) -> ApiResult<Vec<String>> {
    state.client.formats().await.map(Json).map_err(upstream_error)
}

async fn editions_for_format(
    State(state): State<Arc<AppState>>,
    Path(format): Path<String>,
) -> ApiResult<Vec<Edition>> {
    state.client.editions_for_format(&format).await.map(Json).map_err(upstream_error)
}

async fn quran(State(state): State<Arc<AppState>>, Path(edition): Path<String>) -> ApiResult<Quran> {
    state.client.quran(&edition).await.map(Json).map_err(upstream_error)
}

async fn surahs(State(state): State<Arc<AppState>>) -> ApiResult<Vec<SurahReference>> {
    state.client.surahs().await.map(Json).map_err(upstream_error)
}

async fn surah(
    State(state): State<Arc<AppState>>,
    Path((number, edition)): Path<(u32, String)>,
) -> ApiResult<Surah> {
    state.client.surah(number, &edition).await.map(Json).map_err(upstream_error)
}

async fn surah_editions(
    State(state): State<Arc<AppState>>,
    Path((number, editions)): Path<(u32, String)>,
) -> ApiResult<Vec<Surah>> {
    state.client.surah_editions(number, &editions).await.map(Json).map_err(upstream_error)
}

async fn ayah(
    State(state): State<Arc<AppState>>,
    Path((reference, edition)): Path<(String, String)>,
) -> ApiResult<Ayah> {
    state.client.ayah(&reference, &edition).await.map(Json).map_err(upstream_error)
}

async fn ayah_editions(
    State(state): State<Arc<AppState>>,
    Path((reference, editions)): Path<(String, String)>,
) -> ApiResult<Vec<Ayah>> {
    state.client.ayah_editions(&reference, &editions).await.map(Json).map_err(upstream_error)
}

async fn search(
    State(state): State<Arc<AppState>>,
    Path((keyword, surah, edition)): Path<(String, String, String)>,
) -> ApiResult<SearchResults> {
    state.client.search(&keyword, &surah, &edition).await.map(Json).map_err(upstream_error)
}

async fn section(
    state: &AppState,
    kind: SectionKind,
    number: u32,
    edition: &str,
    window: Pagination,
) -> ApiResult<SectionText> {
    state
        .client
        .section(kind, number, edition, window)
        .await
        .map(Json)
        .map_err(upstream_error)
}

async fn juz(
    State(state): State<Arc<AppState>>,
    Path((number, edition)): Path<(u32, String)>,
    Query(window): Query<Pagination>,
) -> ApiResult<SectionText> {
    section(&state, SectionKind::Juz, number, &edition, window).await
}

async fn manzil(
    State(state): State<Arc<AppState>>,
    Path((number, edition)): Path<(u32, String)>,
    Query(window): Query<Pagination>,
) -> ApiResult<SectionText> {
    section(&state, SectionKind::Manzil, number, &edition, window).await
}

async fn ruku(
    State(state): State<Arc<AppState>>,
    Path((number, edition)): Path<(u32, String)>,
    Query(window): Query<Pagination>,
) -> ApiResult<SectionText> {
    section(&state, SectionKind::Ruku, number, &edition, window).await
}

async fn page(
    State(state): State<Arc<AppState>>,
    Path((number, edition)): Path<(u32, String)>,
    Query(window): Query<Pagination>,
) -> ApiResult<SectionText> {
    section(&state, SectionKind::Page, number, &edition, window).await
}

async fn hizb_quarter(
    State(state): State<Arc<AppState>>,
    Path((number, edition)): Path<(u32, String)>,
    Query(window): Query<Pagination>,
) -> ApiResult<SectionText> {
    section(&state, SectionKind::HizbQuarter, number, &edition, window).await
}

async fn sajda(State(state): State<Arc<AppState>>, Path(edition): Path<String>) -> ApiResult<SajdaAyahs> {
    state.client.sajda(&edition).await.map(Json).map_err(upstream_error)
}

async fn meta(State(state): State<Arc<AppState>>) -> ApiResult<Meta> {
    state.client.meta().await.map(Json).map_err(upstream_error)
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(|| async { Redirect::temporary("/home") }))
        .route("/home", get(home))
        .route("/game", get(game))
        .route("/dashboard", get(dashboard))
        .route("/dashboards", get(|| async { Redirect::permanent("/dashboard") }))
        .route("/detail/:id", get(hero_detail))
        .route("/heroes", get(heroes))
        .route("/health", get(health))
        .route("/api/edition", get(editions))
        .route("/api/edition/language", get(languages))
        .route("/api/edition/language/:lang", get(editions_for_language))
        .route("/api/type", get(edition_types))
        .route("/api/type/:type", get(editions_for_type))
        .route("/api/format", get(formats))
        .route("/api/format/:format", get(editions_for_format))
        .route("/api/quran/:edition", get(quran))
        .route("/api/surah", get(surahs))
        .route("/api/surah/:surah/:edition", get(surah))
        .route("/api/surah/:surah/editions/:editions", get(surah_editions))
        .route("/api/ayah/:reference/:edition", get(ayah))
        .route("/api/ayah/:reference/edition/:editions", get(ayah_editions))
        .route("/api/search/:keyword/:surah/:edition", get(search))
        .route("/api/juz/:juz/:edition", get(juz))
        .route("/api/manzil/:manzil/:edition", get(manzil))
        .route("/api/ruku/:ruku/:edition", get(ruku))
        .route("/api/page/:page/:edition", get(page))
        .route("/api/hizbQuarter/:hizb/:edition", get(hizb_quarter))
        .route("/api/sajda/:edition", get(sajda))
        .route("/api/meta", get(meta))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();
    let config = ClientConfig::try_from(args.client)?;

    let state = Arc::new(AppState {
        client: QuranClient::new(&config)?,
        heroes: HeroService::default(),
    });

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    tracing::info!(upstream = %config.base_url, "Listening on http://{}", args.bind);
    axum::serve(listener, app(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alquran_lib::RetryPolicy;
    use serde_json::{json, Value};
    use std::time::Duration;

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Start the app against `upstream_base` and return its address
    async fn spawn_app(upstream_base: String) -> String {
        let config = ClientConfig {
            base_url: upstream_base,
            timeout: Some(Duration::from_secs(5)),
            retry: RetryPolicy::default(),
        };
        let state = Arc::new(AppState {
            client: QuranClient::new(&config).unwrap(),
            heroes: HeroService::default(),
        });
        spawn(app(state)).await
    }

    fn http() -> reqwest::Client {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap()
    }

    fn envelope(data: Value) -> Json<Value> {
        Json(json!({ "code": 200, "status": "OK", "data": data }))
    }

    fn fake_upstream() -> Router {
        let references: Vec<Value> = [(1, "Al-Faatiha"), (36, "Yaseen"), (114, "An-Naas")]
            .iter()
            .map(|(number, name)| {
                json!({
                    "number": number, "name": "سورة", "englishName": name,
                    "englishNameTranslation": name, "numberOfAyahs": 7,
                    "revelationType": "Meccan"
                })
            })
            .collect();
        let empty = json!({ "count": 0, "references": [] });
        let meta = json!({
            "ayahs": { "count": 6236 },
            "surahs": { "count": 3, "references": references },
            "sajdas": empty, "rukus": empty, "pages": empty,
            "manzils": empty, "hizbQuarters": empty, "juzs": empty
        });

        Router::new()
            .route("/v1/meta", get(move || async move { envelope(meta) }))
            .route("/v1/edition/language", get(|| async { envelope(json!(["ar", "en"])) }))
            .route("/v1/edition/language/:lang", get(|| async { envelope(json!([])) }))
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["alquran-api"]).unwrap();
        assert_eq!(args.bind, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());

        let args = Args::try_parse_from([
            "alquran-api", "--bind", "0.0.0.0:8080", "--api-url", "http://localhost:9000/v1",
        ])
        .unwrap();
        assert_eq!(args.bind.port(), 8080);
        assert_eq!(ClientConfig::try_from(args.client).unwrap().base_url, "http://localhost:9000/v1");

        assert!(Args::try_parse_from(["alquran-api", "--bind", "localhost"]).is_err());
    }

    #[tokio::test]
    async fn test_redirects() {
        let base = spawn_app("http://127.0.0.1:9/v1".to_string()).await;
        let client = http();

        let root = client.get(format!("{base}/")).send().await.unwrap();
        assert_eq!(root.status(), reqwest::StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(root.headers()["location"], "/home");

        let alias = client.get(format!("{base}/dashboards")).send().await.unwrap();
        assert_eq!(alias.status(), reqwest::StatusCode::PERMANENT_REDIRECT);
        assert_eq!(alias.headers()["location"], "/dashboard");

        let health: Value = client.get(format!("{base}/health")).send().await.unwrap().json().await.unwrap();
        assert_eq!(health["status"], "ok");
        assert_eq!(health["upstream"], "http://127.0.0.1:9/v1");
    }

    #[tokio::test]
    async fn test_hero_pages() {
        let base = spawn_app("http://127.0.0.1:9/v1".to_string()).await;
        let client = http();

        let heroes: Vec<Hero> = client.get(format!("{base}/heroes")).send().await.unwrap().json().await.unwrap();
        assert_eq!(heroes.len(), 9);

        let hero: Hero = client.get(format!("{base}/detail/13")).send().await.unwrap().json().await.unwrap();
        assert_eq!(hero.name, "Bombasto");

        let missing = client.get(format!("{base}/detail/99")).send().await.unwrap();
        assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_home_view_filters_surahs() {
        let upstream = spawn(fake_upstream()).await;
        let base = spawn_app(format!("{upstream}/v1")).await;

        let view: Value = http()
            .get(format!("{base}/home?filter=%20%20YASEEN%20&lang=en"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(view["selected_language"], "en");
        assert_eq!(view["filter"], "yaseen");
        assert_eq!(view["table"]["length"], 1);
        assert_eq!(view["table"]["rows"][0]["englishName"], "Yaseen");
        assert_eq!(view["languages"][1]["name"], "English");
        assert_eq!(view["alerts"], json!([]));
    }

    #[tokio::test]
    async fn test_upstream_failure_maps_to_bad_gateway() {
        let upstream = spawn(fake_upstream()).await;
        let base = spawn_app(format!("{upstream}/v1")).await;

        let response = http().get(format!("{base}/api/sajda/en.asad")).send().await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);

        let body: Value = response.json().await.unwrap();
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("Error Code: 404\nMessage: Http failure response for"));
    }

    #[tokio::test]
    async fn test_home_reports_alerts_when_upstream_down() {
        let base = spawn_app("http://127.0.0.1:9/v1".to_string()).await;

        let view: Value = http().get(format!("{base}/home")).send().await.unwrap().json().await.unwrap();

        assert_eq!(view["alerts"].as_array().unwrap().len(), 3);
        assert_eq!(view["editions"][0]["identifier"], "ar.muyassar");
        assert_eq!(view["table"]["range_label"], "0 of 0");
    }
}
