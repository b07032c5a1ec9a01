//! `hub` — command-line client for the source code hub.
//!
//! Every command goes through the sync layer, so it keeps working against
//! the local cache when the document service is down.
//!
//! # Usage
//!
//! ```
//! hub --url http://localhost:5000 projects
//! hub login BraynOfficial --password admin
//! hub publish --name "Kit" --language Rust --kind code --content-file kit.rs
//! hub --config ~/.config/hub/config.toml like p-1
//! ```

mod config;

use std::{
  io::{self, BufRead},
  path::PathBuf,
};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use config::{ConfigFile, Overrides, Settings};
use hub_core::{
  admin::{AdminPatch, AdminProfile},
  project::{Project, ProjectDraft, ProjectKind},
  session::Session,
};
use hub_store_sqlite::SqliteStore;
use hub_sync::{
  HttpRemote, SyncFacade,
  assets::{HttpAssetUploader, attach_preview},
};
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

type Facade = SyncFacade<HttpRemote, SqliteStore>;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "hub", about = "Command-line client for the source code hub")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the document service (default: http://localhost:5000).
  #[arg(long, env = "HUB_API_URL")]
  url: Option<String>,

  /// Local cache database (default: ~/.hub/cache.db).
  #[arg(long, env = "HUB_CACHE")]
  cache: Option<PathBuf>,

  /// Print results as JSON.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List projects, newest first.
  Projects,
  /// Show one project and its author.
  Show { id: String },
  /// Like a project.
  Like { id: String },
  /// Record a download of a project.
  Download { id: String },
  /// Log in as an admin.
  Login {
    username: String,
    /// Read from stdin when omitted.
    #[arg(long, env = "HUB_PASSWORD")]
    password: Option<String>,
  },
  Logout,
  /// Show the logged-in admin.
  Whoami,
  /// List the admin directory.
  Admins,
  /// Publish a new project as the logged-in admin.
  Publish {
    #[arg(long)]
    name:         String,
    #[arg(long)]
    language:     String,
    #[arg(long, value_parser = ProjectKind::parse)]
    kind:         ProjectKind,
    #[arg(long, conflicts_with = "content_file")]
    content:      Option<String>,
    #[arg(long, value_name = "FILE")]
    content_file: Option<PathBuf>,
    #[arg(long, default_value = "")]
    notes:        String,
    #[arg(long, conflicts_with = "preview_file")]
    preview_url:  Option<String>,
    /// Image to upload to the asset host.
    #[arg(long, value_name = "FILE")]
    preview_file: Option<PathBuf>,
  },
  /// Delete a project.
  Delete { id: String },
  /// Edit an admin profile (your own unless you are the owner).
  Profile {
    /// Defaults to the logged-in admin.
    #[arg(long)]
    id:        Option<String>,
    #[arg(long)]
    name:      Option<String>,
    #[arg(long)]
    quote:     Option<String>,
    /// Replaces all hashtags; repeat for several.
    #[arg(long = "hashtag")]
    hashtags:  Vec<String>,
    #[arg(long)]
    photo_url: Option<String>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg = match &args.config {
    Some(path) => ConfigFile::load(path)?,
    None => ConfigFile::default(),
  };
  let settings = Settings::resolve(file_cfg, Overrides {
    api_url:    args.url.clone(),
    cache_path: args.cache.clone(),
  });
  tracing::debug!(
    url = %settings.remote.base_url,
    cache = %settings.cache_path.display(),
    "settings resolved"
  );

  if let Some(parent) = settings.cache_path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("creating cache directory {}", parent.display()))?;
  }
  let store = SqliteStore::open(&settings.cache_path)
    .await
    .with_context(|| format!("opening cache {}", settings.cache_path.display()))?;
  let remote = HttpRemote::new(settings.remote.clone()).context("building HTTP client")?;
  let facade = SyncFacade::new(remote, store);

  let outcome = run(&facade, &settings, args.command, args.json).await;

  // Detached remote calls must finish before the runtime goes away.
  facade.settle().await;
  outcome
}

async fn run(facade: &Facade, settings: &Settings, command: Command, json: bool) -> Result<()> {
  match command {
    Command::Projects => {
      let projects = facade.list_projects().await?;
      if json {
        return print_json(&projects);
      }
      for p in &projects {
        println!("{}", project_line(p));
      }
    }

    Command::Show { id } => {
      let Some(project) = facade.list_projects().await?.into_iter().find(|p| p.id == id)
      else {
        bail!("no project with id {id}");
      };
      let author = facade.find_admin(&project.author_id).await?;
      if json {
        return print_json(&serde_json::json!({ "project": project, "author": author }));
      }
      println!("{}", project_detail(&project, author.as_ref()));
    }

    Command::Like { id } => match facade.increment_like(&id).await? {
      Some(likes) => println!("{id}: {likes} likes"),
      None => println!("{id}: not in local cache; like sent to server"),
    },

    Command::Download { id } => match facade.increment_download(&id).await? {
      Some(downloads) => println!("{id}: {downloads} downloads"),
      None => println!("{id}: not in local cache; download sent to server"),
    },

    Command::Login { username, password } => {
      let password = match password {
        Some(p) => p,
        None => read_secret()?,
      };
      let session = facade.sessions().login(&username, &password).await?;
      println!("logged in as {} ({})", session.admin().name, session.role());
    }

    Command::Logout => {
      facade.sessions().logout().await?;
      println!("logged out");
    }

    Command::Whoami => match facade.sessions().current().await? {
      Some(session) if json => return print_json(&session.profile()),
      Some(session) => println!("{}", admin_line(&session.profile())),
      None => println!("not logged in"),
    },

    Command::Admins => {
      let admins = facade.list_admins().await?;
      if json {
        return print_json(&admins);
      }
      for a in &admins {
        println!("{}", admin_line(a));
      }
    }

    Command::Publish {
      name,
      language,
      kind,
      content,
      content_file,
      notes,
      preview_url,
      preview_file,
    } => {
      let session = require_session(facade).await?;
      let content = match (content, content_file) {
        (Some(c), _) => c,
        (None, Some(path)) => std::fs::read_to_string(&path)
          .with_context(|| format!("reading {}", path.display()))?,
        (None, None) => bail!("one of --content or --content-file is required"),
      };

      let mut draft = ProjectDraft::new(name, language, kind, content);
      draft.notes = notes;
      if let Some(url) = preview_url {
        draft = draft.with_preview(url);
      }
      if let Some(path) = preview_file {
        let Some(assets) = settings.assets.clone() else {
          bail!("--preview-file needs asset_endpoint in the config file");
        };
        let bytes =
          std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let file_name = path
          .file_name()
          .map(|n| n.to_string_lossy().into_owned())
          .unwrap_or_else(|| "preview".to_string());
        draft = attach_preview(&HttpAssetUploader::new(assets), draft, file_name, bytes)
          .await
          .context("uploading preview image")?;
      }

      let project = facade.save_project(&session, draft).await?;
      if json {
        return print_json(&project);
      }
      println!("published {}", project_line(&project));
    }

    Command::Delete { id } => {
      let session = require_session(facade).await?;
      facade.delete_project(&session, &id).await?;
      println!("deleted {id}");
    }

    Command::Profile { id, name, quote, hashtags, photo_url } => {
      let session = require_session(facade).await?;
      let patch = AdminPatch {
        name,
        quote,
        hashtags: (!hashtags.is_empty()).then_some(hashtags),
        photo_url,
      };
      if patch.is_empty() {
        bail!("nothing to change");
      }
      let target = id.unwrap_or_else(|| session.admin_id().to_owned());
      facade.update_admin(&session, &target, patch).await?;
      println!("updated {target}");
    }
  }
  Ok(())
}

async fn require_session(facade: &Facade) -> Result<Session> {
  match facade.sessions().current().await? {
    Some(s) => Ok(s),
    None => bail!("not logged in; run `hub login <username>` first"),
  }
}

fn read_secret() -> Result<String> {
  eprint!("password: ");
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line).context("reading password")?;
  Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

// ─── Output ───────────────────────────────────────────────────────────────────

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

fn project_line(p: &Project) -> String {
  format!(
    "{:<16} {:<28} {:<18} {:>5}♥ {:>5}↓",
    p.id, p.name, p.language, p.likes, p.downloads
  )
}

fn project_detail(p: &Project, author: Option<&AdminProfile>) -> String {
  let author = match author {
    Some(a) => format!("{} (@{})", a.name, a.username),
    None => format!("unknown ({})", p.author_id),
  };
  let mut out = format!(
    "{name}\n  id:        {id}\n  type:      {kind}\n  language:  {lang}\n  author:    {author}\n  created:   {created}\n  likes:     {likes}\n  downloads: {downloads}",
    name = p.name,
    id = p.id,
    kind = p.kind,
    lang = p.language,
    created = p.created_at.format("%Y-%m-%d %H:%M"),
    likes = p.likes,
    downloads = p.downloads,
  );
  if !p.preview_url.is_empty() {
    out.push_str(&format!("\n  preview:   {}", p.preview_url));
  }
  if !p.notes.is_empty() {
    out.push_str(&format!("\n\n{}", p.notes));
  }
  out
}

fn admin_line(a: &AdminProfile) -> String {
  format!("{:<10} {:<16} {:<6} {}", a.id, a.name, a.role, a.hashtags.join(" "))
}
