mod backend;
mod session_store;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context as _};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use infocomic_core::comic::Comic;
use infocomic_core::presentation::{render_chapter_text, render_header, tokenize_hoverable, ChapterPager, Token};
use infocomic_core::reel::{ReelOptions, DEFAULT_OUTPUT_FILENAME, DEFAULT_SUBTITLE_STYLE};
use infocomic_core::theme::ComicStyle;
use infocomic_gateway::{ComicRequest, GatewayApi, GatewayConfig};
use infocomic_pipeline::flows::{explain_term, fill_missing_images, generate_comic};
use infocomic_pipeline::{ReelAssembler, SessionContext};

use crate::backend::{BackendClient, BlogRecord};

#[derive(Parser, Debug)]
#[command(name = "infocomic", version, about = "Generate, read and publish educational comics")]
struct Cli {
    /// Base URL of the generation service.
    #[arg(long, env = "GENAI_API_URL", default_value = "http://localhost:5001", global = true)]
    genai_url: String,

    /// Timeout for generation calls, in seconds. Unset waits indefinitely.
    #[arg(long, env = "GATEWAY_TIMEOUT_SECS", global = true)]
    gateway_timeout_secs: Option<u64>,

    /// Base URL of the InfoComic backend.
    #[arg(long, env = "BACKEND_URL", default_value = "http://localhost:5000", global = true)]
    backend_url: String,

    /// Session file carrying the current comic, reel and sign-in.
    #[arg(long, env = "INFOCOMIC_SESSION", default_value = ".infocomic/session.json", global = true)]
    session: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a comic for a topic and make it current.
    Generate(GenerateArgs),
    /// Generate images for chapters that still lack one.
    Images,
    /// Build a narrated video reel from the current comic.
    Reel(ReelArgs),
    /// Explain a word in the context of a chapter.
    Explain(ExplainArgs),
    /// Print a chapter of the current comic.
    Show(ShowArgs),
    /// Create an account and sign in.
    Register(RegisterArgs),
    /// Sign in to an existing account.
    Login(LoginArgs),
    /// Forget the signed-in user.
    Logout,
    /// Publish the current comic, with its reel if one was built.
    Publish(PublishArgs),
    /// List published comic blogs.
    Blogs(BlogsArgs),
    /// Load a published comic blog as the current comic.
    Open(OpenArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    topic: String,
    #[arg(long, default_value = "general")]
    domain: String,
    #[arg(long, default_value = "medium")]
    complexity: String,
    #[arg(long, default_value = "teens")]
    age: String,
    #[arg(long, default_value = "middle_school")]
    education: String,
    /// Writing style requested from the generator.
    #[arg(long, default_value = "educational")]
    style: String,
    /// Display theme (marvel, dc, manga, indie). Guessed from the topic when omitted.
    #[arg(long)]
    theme: Option<String>,
    /// Also generate the chapter images.
    #[arg(long, default_value_t = false)]
    with_images: bool,
}

#[derive(Args, Debug)]
struct ReelArgs {
    #[arg(long, default_value = DEFAULT_OUTPUT_FILENAME)]
    output_filename: String,
    #[arg(long, default_value = DEFAULT_SUBTITLE_STYLE)]
    subtitle_style: String,
}

#[derive(Args, Debug)]
struct ExplainArgs {
    word: String,
    /// Text around the word. Defaults to the chapter's narration.
    #[arg(long)]
    context: Option<String>,
    /// 1-based chapter the word comes from.
    #[arg(long, default_value_t = 1)]
    chapter: usize,
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// 1-based chapter to print; out-of-range values clamp.
    #[arg(long, default_value_t = 1)]
    chapter: usize,
    /// List the hoverable term ids of the narration.
    #[arg(long, default_value_t = false)]
    terms: bool,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    /// Interest domain; repeat for several.
    #[arg(long = "domain")]
    domains: Vec<String>,
    #[arg(long)]
    education_level: Option<String>,
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

#[derive(Args, Debug)]
struct PublishArgs {
    /// Blog title. Defaults to the comic topic.
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args, Debug)]
struct BlogsArgs {
    /// Only blogs owned by the signed-in user.
    #[arg(long, default_value_t = false)]
    mine: bool,
}

#[derive(Args, Debug)]
struct OpenArgs {
    title: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "infocomic=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut session = session_store::load(&cli.session)?;

    let result = run(&cli, &mut session).await;
    // Saved on failure too: images filled before an error stay on the comic.
    session_store::save(&cli.session, &session)?;
    result
}

async fn run(cli: &Cli, session: &mut SessionContext) -> anyhow::Result<()> {
    match &cli.cmd {
        Command::Generate(args) => cmd_generate(cli, session, args).await,
        Command::Images => cmd_images(cli, session).await,
        Command::Reel(args) => cmd_reel(cli, session, args).await,
        Command::Explain(args) => cmd_explain(cli, session, args).await,
        Command::Show(args) => cmd_show(session, args),
        Command::Register(args) => cmd_register(cli, session, args).await,
        Command::Login(args) => cmd_login(cli, session, args).await,
        Command::Logout => {
            session.sign_out();
            println!("Signed out");
            Ok(())
        }
        Command::Publish(args) => cmd_publish(cli, session, args).await,
        Command::Blogs(args) => cmd_blogs(cli, session, args).await,
        Command::Open(args) => cmd_open(cli, session, args).await,
    }
}

fn gateway(cli: &Cli) -> anyhow::Result<GatewayApi> {
    let config = GatewayConfig::new(cli.genai_url.as_str())
        .with_timeout(cli.gateway_timeout_secs.map(Duration::from_secs));
    GatewayApi::new(&config).context("build generation client")
}

fn current_comic(session: &SessionContext) -> anyhow::Result<&Comic> {
    session
        .comic
        .as_ref()
        .context("no comic loaded; run `infocomic generate <topic>` or `infocomic open <title>`")
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

async fn cmd_generate(cli: &Cli, session: &mut SessionContext, args: &GenerateArgs) -> anyhow::Result<()> {
    let gateway = gateway(cli)?;
    let request = ComicRequest {
        topic: args.topic.clone(),
        domain: args.domain.clone(),
        complexity: args.complexity.clone(),
        age: args.age.clone(),
        education: args.education.clone(),
        style: args.style.clone(),
    };
    let theme = args.theme.as_deref().map(|key| ComicStyle::resolve(Some(key)));

    let comic = generate_comic(&gateway, session, &request, theme).await?;
    print!("{}", render_header(comic, comic.display_style().theme()));
    println!("{} chapter(s)", comic.chapters.len());

    if args.with_images {
        cmd_images(cli, session).await?;
    }
    Ok(())
}

async fn cmd_images(cli: &Cli, session: &mut SessionContext) -> anyhow::Result<()> {
    let gateway = gateway(cli)?;
    let comic = session
        .comic
        .as_mut()
        .context("no comic loaded; run `infocomic generate <topic>` first")?;

    let generated = fill_missing_images(&gateway, comic).await?;
    println!("Generated {generated} image(s)");
    Ok(())
}

async fn cmd_reel(cli: &Cli, session: &mut SessionContext, args: &ReelArgs) -> anyhow::Result<()> {
    let assembler = ReelAssembler::new(Arc::new(gateway(cli)?));
    let options = ReelOptions {
        output_filename: args.output_filename.clone(),
        subtitle_style: args.subtitle_style.clone(),
    };

    let video = assembler.assemble_for_session(session, &options).await?;
    println!("Reel ready: {}", video.url);
    if video.duration_seconds > 0.0 {
        println!("{} ({}, {:.1}s)", video.filename, video.format, video.duration_seconds);
    }
    Ok(())
}

async fn cmd_explain(cli: &Cli, session: &SessionContext, args: &ExplainArgs) -> anyhow::Result<()> {
    let context = match &args.context {
        Some(context) => context.clone(),
        None => chapter_context(current_comic(session)?, args.chapter)?,
    };
    let explanation = explain_term(&gateway(cli)?, &context, &args.word).await?;
    println!("{explanation}");
    Ok(())
}

/// Narration of the chapter at 1-based `page`, else its conclusion or title.
fn chapter_context(comic: &Comic, page: usize) -> anyhow::Result<String> {
    let mut pager = ChapterPager::for_comic(comic).context("comic has no chapters")?;
    pager.go_to(page);
    Ok(comic.chapters[pager.index()].fallback_text().to_string())
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

fn cmd_show(session: &SessionContext, args: &ShowArgs) -> anyhow::Result<()> {
    let comic = current_comic(session)?;
    comic.validate_paging()?;
    let theme = comic.display_style().theme();
    let mut pager = ChapterPager::for_comic(comic).context("comic has no chapters")?;
    pager.go_to(args.chapter);
    let chapter = &comic.chapters[pager.index()];

    print!("{}", render_header(comic, theme));
    println!();
    print!("{}", render_chapter_text(chapter, &pager, theme));

    if args.terms {
        if let Some(narration) = &chapter.narration_box {
            println!();
            for token in tokenize_hoverable(narration, "narration") {
                if let Token::Term { id, text } = token {
                    println!("{id}\t{text}");
                }
            }
        }
    }
    if let Some(video) = &session.generated_video {
        println!("\nReel: {}", video.url);
    } else if let Some(url) = &comic.video_reference {
        println!("\nReel: {url}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

async fn cmd_register(cli: &Cli, session: &mut SessionContext, args: &RegisterArgs) -> anyhow::Result<()> {
    let auth = BackendClient::new(&cli.backend_url)
        .register(
            &args.email,
            &args.password,
            args.first_name.as_deref(),
            args.last_name.as_deref(),
            &args.domains,
            args.education_level.as_deref(),
        )
        .await?;
    println!("{} ({})", auth.message, auth.user.display_name());
    session.sign_in(auth);
    Ok(())
}

async fn cmd_login(cli: &Cli, session: &mut SessionContext, args: &LoginArgs) -> anyhow::Result<()> {
    let auth = BackendClient::new(&cli.backend_url)
        .login(&args.email, &args.password)
        .await?;
    println!("{} ({})", auth.message, auth.user.display_name());
    session.sign_in(auth);
    Ok(())
}

// ---------------------------------------------------------------------------
// Publishing
// ---------------------------------------------------------------------------

async fn cmd_publish(cli: &Cli, session: &mut SessionContext, args: &PublishArgs) -> anyhow::Result<()> {
    let (Some(user), Some(token)) = (&session.user, &session.token) else {
        bail!("sign in with `infocomic login` before publishing");
    };
    let comic = current_comic(session)?;
    let title = args.title.as_deref().unwrap_or(&comic.topic);

    let backend = BackendClient::new(&cli.backend_url);
    let blog = backend.publish(title, &user.email, comic).await?;
    println!("Published '{}' (id {})", blog.title, blog.id);

    if let Some(video) = &session.generated_video {
        backend.attach_video(token, blog.id, &video.url).await?;
        println!("Attached reel {}", video.url);
    }
    Ok(())
}

async fn cmd_blogs(cli: &Cli, session: &SessionContext, args: &BlogsArgs) -> anyhow::Result<()> {
    let backend = BackendClient::new(&cli.backend_url);
    let blogs = if args.mine {
        let user = session
            .user
            .as_ref()
            .context("sign in with `infocomic login` to list your blogs")?;
        backend.user_blogs(&user.email).await?
    } else {
        backend.list_blogs().await?
    };

    if blogs.is_empty() {
        println!("No comic blogs yet");
    }
    for blog in &blogs {
        print_blog(blog);
    }
    Ok(())
}

fn print_blog(blog: &BlogRecord) {
    let reel = if blog.video_url.is_some() { " [reel]" } else { "" };
    println!(
        "{}\t{} chapter(s)\t{}{reel}",
        blog.title,
        blog.chapters.len(),
        blog.email
    );
}

async fn cmd_open(cli: &Cli, session: &mut SessionContext, args: &OpenArgs) -> anyhow::Result<()> {
    let blog = BackendClient::new(&cli.backend_url)
        .get_blog(&args.title)
        .await?;
    let comic = session.set_comic(blog.into_comic());
    print!("{}", render_header(comic, comic.display_style().theme()));
    Ok(())
}
