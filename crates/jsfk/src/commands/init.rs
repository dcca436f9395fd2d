//! Scaffold a blog in the current directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing jsfk...");
    scaffold(config_path, Path::new("."), yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'jsfk build' to generate the site data.");

    Ok(())
}

/// Write the config and a sample article for each locale under `root`.
fn scaffold(config_path: &Path, root: &Path, yes: bool) -> Result<()> {
    let config_path = root.join(config_path);
    if !config_path.exists() || yes {
        fs::write(&config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    } else {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
    }

    let samples = [
        (root.join("articles"), SAMPLE_RU),
        (root.join("en").join("articles"), SAMPLE_EN),
    ];

    for (dir, content) in samples {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let path = dir.join("hello-world.md");
        if !path.exists() || yes {
            fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Created {}", path.display());
        }
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# jsfk configuration

[site]
title = "JS F/k"
base_url = "https://js-f-k.netlify.app"
copyright = "CC-BY-NC-SA 4.0 © 2025 JS F/k Team"
# Directory holding articles/ and <locale>/articles/
content_dir = "."
# Output directory for generated data, feeds and sitemap
output = "dist"
favicon = "/images/favicon.ico"
feed_stylesheet = "/pretty-feed-v3.xsl"
date_format = "DD MMMM, YYYY"

[[locales]]
code = "ru"
lang = "ru"
label = "Русский"
link = "/"
description = "HTML/TS/Vue — с примерами, по делу, без воды"
nav = [
  { text = "Статьи по датам", link = "/articles-by-date" },
  { text = "Статьи по тегам", link = "/articles-by-tag" },
]

[[locales]]
code = "en"
lang = "en"
label = "English"
link = "/en"
description = "HTML/TS/Vue — with examples, to the point, no fluff"
nav = [
  { text = "Articles by date", link = "/en/articles-by-date" },
  { text = "Articles by tag", link = "/en/articles-by-tag" },
]

[[authors]]
id = "vchet"
name = "VChet"
avatar = "https://github.com/VChet.png"
url = "https://github.com/VChet"

[[authors]]
id = "rudnovd"
name = "rudnovd"
avatar = "https://github.com/rudnovd.png"
url = "https://github.com/rudnovd"
"#;

const SAMPLE_RU: &str = r#"---
title: Привет, мир
description: Первая статья блога
author: vchet
tags: [javascript]
publish: false
---

# Привет, мир

Уберите `publish: false` и добавьте `date`, чтобы опубликовать статью.
"#;

const SAMPLE_EN: &str = r#"---
title: Hello, world
description: The first article of the blog
author: vchet
tags: [javascript]
publish: false
---

# Hello, world

Remove `publish: false` and add a `date` to publish the article.
"#;
