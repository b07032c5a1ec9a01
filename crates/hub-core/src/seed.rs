//! The fixed default data set used when a collection is uninitialised or the
//! document service has nothing to offer.

use chrono::{DateTime, Duration, Utc};

use crate::{
  admin::{Admin, AdminRole},
  project::{Project, ProjectKind},
};

const CYBER_BUTTON: &str = r#"const CyberButton = () => (
  <button className="bg-red-600 hover:bg-red-700 text-white font-bold py-2 px-4 rounded-3xl shadow-lg transition-all transform hover:scale-105">
    INITIALIZE SYSTEM
  </button>
);"#;

/// The provisioned admin identities.
pub fn admins() -> Vec<Admin> {
  vec![
    Admin {
      id:        "admin-1".into(),
      username:  "BraynOfficial".into(),
      name:      "Brayn Official".into(),
      role:      AdminRole::Owner,
      quote:     "Code is the architecture of the soul. In the digital void, we are the architects."
        .into(),
      hashtags:  vec!["#CodeMaster".into(), "#CyberArchitect".into(), "#Innovator".into()],
      photo_url: "https://picsum.photos/seed/brayn/400/400".into(),
      secret:    "admin".into(),
    },
    Admin {
      id:        "admin-2".into(),
      username:  "Silverhold".into(),
      name:      "Silverhold".into(),
      role:      AdminRole::Admin,
      quote:     "Security is an illusion. Efficiency is the only truth in a world of data."
        .into(),
      hashtags:  vec!["#SecOps".into(), "#Efficiency".into(), "#TechVanguard".into()],
      photo_url: "https://picsum.photos/seed/silver/400/400".into(),
      secret:    "admin".into(),
    },
  ]
}

/// The showcase projects, newest first, with creation times relative to
/// `now`.
pub fn projects(now: DateTime<Utc>) -> Vec<Project> {
  vec![
    Project {
      id:          "p-1".into(),
      name:        "Cyberpunk UI Kit".into(),
      language:    "React/Tailwind".into(),
      kind:        ProjectKind::Code,
      content:     CYBER_BUTTON.into(),
      notes:       "A collection of futuristic UI components optimized for high performance."
        .into(),
      preview_url: "https://picsum.photos/seed/cyber/800/450".into(),
      likes:       124,
      downloads:   450,
      author_id:   "admin-1".into(),
      created_at:  now,
    },
    Project {
      id:          "p-2".into(),
      name:        "Deep Neural Visualizer".into(),
      language:    "Python".into(),
      kind:        ProjectKind::File,
      content:     "https://github.com/braynofficial/deep-visualizer".into(),
      notes:       "Real-time visualization tool for convolutional neural networks.".into(),
      preview_url: "https://picsum.photos/seed/neuron/800/450".into(),
      likes:       89,
      downloads:   210,
      author_id:   "admin-2".into(),
      created_at:  now - Duration::days(1),
    },
  ]
}
