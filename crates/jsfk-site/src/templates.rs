//! XML templates for feeds and sitemaps.

use chrono::{DateTime, Utc};
use minijinja::{context, AutoEscape, Environment, Value};

use crate::feed::{FeedChannel, FeedItem};
use crate::sitemap::SitemapUrl;

/// Generator name written into feeds.
pub const GENERATOR: &str = concat!("jsfk ", env!("CARGO_PKG_VERSION"));

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Escaping is explicit: text goes through `xml`, markup through `cdata`.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("xml", escape_xml);
        env.add_filter("cdata", cdata);

        env.add_template_owned("rss.xml".to_string(), RSS_TEMPLATE.to_string())
            .expect("Failed to add rss template");
        env.add_template_owned("sitemap.xml".to_string(), SITEMAP_TEMPLATE.to_string())
            .expect("Failed to add sitemap template");

        Self { env }
    }

    /// Render an RSS 2.0 document.
    pub fn render_rss(
        &self,
        channel: &FeedChannel,
        items: &[FeedItem],
        stylesheet: Option<&str>,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("rss.xml")?;

        let items: Vec<Value> = items
            .iter()
            .map(|item| {
                context! {
                    title => &item.title,
                    id => &item.id,
                    link => &item.link,
                    pub_date => http_date(&item.date),
                    description => &item.description,
                    content => &item.content,
                }
            })
            .collect();

        tmpl.render(context! {
            channel => channel,
            updated => http_date(&channel.updated),
            generator => GENERATOR,
            stylesheet => stylesheet,
            items => items,
        })
    }

    /// Render a sitemap `urlset`.
    pub fn render_sitemap(&self, urls: &[SitemapUrl]) -> Result<String, minijinja::Error> {
        self.env
            .get_template("sitemap.xml")?
            .render(context! { urls => urls })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Date in the RFC 822 form RSS readers expect, always in GMT.
pub fn http_date(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Escape text for XML element content and attribute values.
pub fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap text in a CDATA section. A literal `]]>` is split across two sections.
pub fn cdata(value: &str) -> String {
    format!("<![CDATA[{}]]>", value.replace("]]>", "]]]]><![CDATA[>"))
}

const RSS_TEMPLATE: &str = r##"<?xml version="1.0" encoding="utf-8"?>
{% if stylesheet %}
<?xml-stylesheet href="{{ stylesheet | xml }}" type="text/xsl"?>
{% endif %}
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/" xmlns:atom="http://www.w3.org/2005/Atom">
    <channel>
        <title>{{ channel.title | xml }}</title>
        <link>{{ channel.link | xml }}</link>
        <description>{{ channel.description | xml }}</description>
        <lastBuildDate>{{ updated }}</lastBuildDate>
        <docs>https://validator.w3.org/feed/docs/rss2.html</docs>
        <generator>{{ generator | xml }}</generator>
        <language>{{ channel.language | xml }}</language>
        <image>
            <title>{{ channel.title | xml }}</title>
            <url>{{ channel.favicon | xml }}</url>
            <link>{{ channel.link | xml }}</link>
        </image>
        <copyright>{{ channel.copyright | xml }}</copyright>
        <atom:link href="{{ channel.rss_link | xml }}" rel="self" type="application/rss+xml"/>
        {% for item in items %}
        <item>
            <title>{{ item.title | cdata }}</title>
            <link>{{ item.link | xml }}</link>
            <guid>{{ item.id | xml }}</guid>
            <pubDate>{{ item.pub_date }}</pubDate>
            <description>{{ item.description | cdata }}</description>
            <content:encoded>{{ item.content | cdata }}</content:encoded>
        </item>
        {% endfor %}
    </channel>
</rss>
"##;

const SITEMAP_TEMPLATE: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{% for url in urls %}
  <url>
    <loc>{{ url.loc | xml }}</loc>
    {% if url.lastmod %}
    <lastmod>{{ url.lastmod }}</lastmod>
    {% endif %}
  </url>
{% endfor %}
</urlset>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_xml_specials() {
        assert_eq!(
            escape_xml(r#"Tom & "Jerry" <3 'x'"#),
            "Tom &amp; &quot;Jerry&quot; &lt;3 &apos;x&apos;"
        );
    }

    #[test]
    fn splits_cdata_terminator() {
        assert_eq!(cdata("a]]>b"), "<![CDATA[a]]]]><![CDATA[>b]]>");
        assert_eq!(cdata("<p>ok</p>"), "<![CDATA[<p>ok</p>]]>");
    }

    #[test]
    fn formats_http_dates() {
        let date = Utc.with_ymd_and_hms(2025, 5, 14, 8, 5, 0).unwrap();

        assert_eq!(http_date(&date), "Wed, 14 May 2025 08:05:00 GMT");
    }

    #[test]
    fn rss_declares_only_used_namespaces() {
        let config = SiteConfig::default();
        let updated = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let channel = FeedChannel::for_locale(&config, config.root_locale().unwrap(), updated);

        let xml = TemplateEngine::new().render_rss(&channel, &[], None).unwrap();

        assert!(xml.contains("<rss version=\"2.0\" xmlns:content="));
        assert!(xml.contains("xmlns:atom="));
        assert!(!xml.contains("xmlns:dc"));
    }

    #[test]
    fn renders_sitemap() {
        let engine = TemplateEngine::new();
        let urls = vec![
            SitemapUrl {
                loc: "https://example.com/".to_string(),
                lastmod: None,
            },
            SitemapUrl {
                loc: "https://example.com/articles/a?x=1&y=2".to_string(),
                lastmod: Some("2025-01-01".to_string()),
            },
        ];

        let xml = engine.render_sitemap(&urls).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset"));
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<loc>https://example.com/articles/a?x=1&amp;y=2</loc>"));
        assert!(xml.contains("<lastmod>2025-01-01</lastmod>"));
        assert_eq!(xml.matches("<lastmod>").count(), 1);
    }
}
