//! # PokeCatch API サーバー
//!
//! ユーザー登録・ログイン（JWT 発行）と、ポケモンの捕獲・一覧・解放を提供する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `JWT_SECRET` | **Yes** | トークン署名用の秘密鍵 |
//! | `TOKEN_TTL_SECS` | No | トークンの有効期間（デフォルト: `3600`） |
//! | `PASSWORD_HASH_MEMORY_KIB` | No | Argon2 のメモリコスト（デフォルト: `19456`） |
//! | `PASSWORD_HASH_ITERATIONS` | No | Argon2 の反復回数（デフォルト: `2`） |
//! | `POKEAPI_BASE_URL` | No | PokeAPI のベース URL |
//! | `POKEAPI_VALIDATE_ON_CATCH` | No | 捕獲前に PokeAPI で名前を確認するか（デフォルト: `true`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p pokecatch-api
//!
//! # 本番環境
//! API_PORT=3000 DATABASE_URL=postgres://... JWT_SECRET=... cargo run -p pokecatch-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use pokecatch_api::{
    app_builder::{AppDependencies, build_app},
    client::{PokeApiClient, PokeApiClientImpl},
    config::ApiConfig,
    handler::ReadinessState,
    usecase::{AuthUseCaseImpl, PokemonUseCaseImpl, UserUseCaseImpl},
};
use pokecatch_domain::clock::{Clock, SystemClock};
use pokecatch_infra::{
    Argon2PasswordHasher,
    JwtTokenManager,
    TokenManager,
    db,
    repository::{
        CaughtPokemonRepository,
        PokemonRepository,
        PostgresCaughtPokemonRepository,
        PostgresPokemonRepository,
        PostgresUserRepository,
        UserRepository,
    },
};
use pokecatch_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let _app_span = init_tracing(&TracingConfig::from_env("pokecatch-api"));

    let config = ApiConfig::from_env().context("設定の読み込みに失敗しました")?;
    tracing::debug!(?config, "設定を読み込みました");
    tracing::info!(
        "PokeCatch API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    // Readiness Check 用 State（pool が move される前に clone）
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    // 依存コンポーネントを初期化
    let user_repository: Arc<dyn UserRepository> =
        Arc::new(PostgresUserRepository::new(pool.clone()));
    let pokemon_repository: Arc<dyn PokemonRepository> =
        Arc::new(PostgresPokemonRepository::new(pool.clone()));
    let caught_repository: Arc<dyn CaughtPokemonRepository> =
        Arc::new(PostgresCaughtPokemonRepository::new(pool));

    // 具象型で保持し、ハッシュ化と検証の両トレイトへ coerce する
    let password_hasher = Arc::new(
        Argon2PasswordHasher::new(
            config.password_hash.memory_kib,
            config.password_hash.iterations,
        )
        .context("パスワードハッシュの設定が不正です")?,
    );
    let token_manager: Arc<dyn TokenManager> = Arc::new(
        JwtTokenManager::new(&config.jwt_secret, config.token_ttl_secs)
            .context("トークン設定が不正です")?,
    );
    let poke_api_client: Arc<dyn PokeApiClient> = Arc::new(
        PokeApiClientImpl::new(&config.pokeapi_base_url)
            .context("PokeAPI クライアントの初期化に失敗しました")?,
    );
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let app = build_app(AppDependencies {
        auth_usecase: Arc::new(AuthUseCaseImpl::new(
            user_repository.clone(),
            password_hasher.clone(),
            password_hasher,
            token_manager,
            clock.clone(),
        )),
        user_usecase: Arc::new(UserUseCaseImpl::new(user_repository)),
        pokemon_usecase: Arc::new(PokemonUseCaseImpl::new(
            pokemon_repository,
            caught_repository,
            poke_api_client,
            clock,
            config.pokeapi_validate_on_catch,
        )),
        readiness_state,
    });

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("PokeCatch API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
