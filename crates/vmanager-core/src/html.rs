//! HTML microformat generation and scanning.
//!
//! Uses `quick-xml`'s writer API for export and its event reader for
//! import. Exports are well-formed XHTML fragments: one `<div class="…">`
//! block per entity whose children are `<div>`/`<abbr>` elements keyed by
//! their `class` attribute. The scanner walks elements structurally, so
//! whitespace, attribute order and indentation do not matter on import.

use quick_xml::{
  Reader, Writer,
  events::{BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::{Error, Result};

fn markup(e: impl std::fmt::Display) -> Error { Error::Markup(e.to_string()) }

// ─── Page options ────────────────────────────────────────────────────────────

/// How an HTML export is wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlPage {
  /// Emit a full `<!DOCTYPE html>` document instead of a bare fragment.
  pub complete: bool,
  /// `lang` attribute of the `<html>` element.
  pub lang:     String,
  /// Contents of `<title>`.
  pub title:    String,
}

impl HtmlPage {
  /// Microformat blocks only.
  pub fn fragment() -> Self {
    Self {
      complete: false,
      lang:     "fr".to_string(),
      title:    String::new(),
    }
  }

  /// A complete page with the given language and title.
  pub fn complete(lang: impl Into<String>, title: impl Into<String>) -> Self {
    Self {
      complete: true,
      lang:     lang.into(),
      title:    title.into(),
    }
  }
}

// ─── Writer ──────────────────────────────────────────────────────────────────

/// Streams microformat blocks into a string.
///
/// The first line of the output is always the `<!--marker-->` comment used
/// by [`crate::export::detect`].
pub struct MicroformatWriter {
  writer:   Writer<Vec<u8>>,
  complete: bool,
}

impl MicroformatWriter {
  pub fn new(marker: &str, page: &HtmlPage) -> Result<Self> {
    let mut this = Self {
      writer:   Writer::new_with_indent(Vec::new(), b'\t', 1),
      complete: page.complete,
    };

    this.write(Event::Comment(BytesText::new(marker)))?;

    if page.complete {
      this.write(Event::DocType(BytesText::from_escaped("html")))?;
      let mut html = BytesStart::new("html");
      html.push_attribute(("lang", page.lang.as_str()));
      this.write(Event::Start(html))?;
      this.write(Event::Start(BytesStart::new("head")))?;
      this.text_element("title", &[], &page.title)?;
      this.write(Event::End(BytesEnd::new("head")))?;
      this.write(Event::Start(BytesStart::new("body")))?;
    }

    Ok(this)
  }

  /// Open an entity block: `<div class="{class}">`.
  pub fn open(&mut self, class: &str) -> Result<()> {
    let mut div = BytesStart::new("div");
    div.push_attribute(("class", class));
    self.write(Event::Start(div))
  }

  /// Close the block opened by [`Self::open`].
  pub fn close(&mut self) -> Result<()> {
    self.write(Event::End(BytesEnd::new("div")))
  }

  /// `<div class="{class}">{text}</div>`
  pub fn div(&mut self, class: &str, text: &str) -> Result<()> {
    self.text_element("div", &[("class", class)], text)
  }

  /// `<abbr class="{class}" title="{title}">{text}</abbr>`
  pub fn abbr(&mut self, class: &str, title: &str, text: &str) -> Result<()> {
    self.text_element("abbr", &[("class", class), ("title", title)], text)
  }

  pub fn finish(mut self) -> Result<String> {
    if self.complete {
      self.write(Event::End(BytesEnd::new("body")))?;
      self.write(Event::End(BytesEnd::new("html")))?;
    }
    let mut out = String::from_utf8(self.writer.into_inner()).map_err(markup)?;
    out.push('\n');
    Ok(out)
  }

  fn text_element(
    &mut self,
    tag: &str,
    attrs: &[(&str, &str)],
    text: &str,
  ) -> Result<()> {
    let mut start = BytesStart::new(tag);
    for (k, v) in attrs {
      start.push_attribute((*k, *v));
    }
    self.write(Event::Start(start))?;
    // always written, even when empty, so the end tag stays on this line
    self.write(Event::Text(BytesText::new(text)))?;
    self.write(Event::End(BytesEnd::new(tag)))
  }

  fn write(&mut self, event: Event<'_>) -> Result<()> {
    self.writer.write_event(event).map_err(markup)
  }
}

// ─── Scanner ─────────────────────────────────────────────────────────────────

/// One entity block found by [`scan`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MicroformatBlock {
  /// The root class that matched, e.g. `vevent`.
  pub class:      String,
  /// `(class, value)` pairs in document order.
  pub properties: Vec<(String, String)>,
}

impl MicroformatBlock {
  /// First value carried by a child with this class.
  pub fn get(&self, class: &str) -> Option<&str> {
    self
      .properties
      .iter()
      .find(|(c, _)| c == class)
      .map(|(_, v)| v.as_str())
  }

  /// Every value carried by children with this class.
  pub fn all<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a str> {
    self
      .properties
      .iter()
      .filter(move |(c, _)| c == class)
      .map(|(_, v)| v.as_str())
  }
}

struct PendingProperty {
  class: String,
  title: Option<String>,
  text:  String,
  depth: usize,
}

impl PendingProperty {
  /// An element's `title` attribute wins over its text.
  fn finish(self) -> (String, String) {
    (self.class, self.title.unwrap_or(self.text))
  }
}

fn attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
  match e.try_get_attribute(name).map_err(markup)? {
    Some(attr) => Ok(Some(attr.unescape_value().map_err(markup)?.into_owned())),
    None => Ok(None),
  }
}

/// The first token of the element's `class` attribute.
fn first_class(e: &BytesStart<'_>) -> Result<Option<String>> {
  Ok(
    attribute(e, "class")?
      .and_then(|c| c.split_whitespace().next().map(str::to_string)),
  )
}

/// The root class this element opens, if any of its classes is in `roots`.
fn root_class(e: &BytesStart<'_>, roots: &[&str]) -> Result<Option<String>> {
  Ok(attribute(e, "class")?.and_then(|c| {
    c.split_whitespace()
      .find(|token| roots.contains(token))
      .map(str::to_string)
  }))
}

/// Collect every element whose class is one of `roots`, together with the
/// classed elements nested inside it.
///
/// A block still open at end of input is kept. Values come back trimmed, so
/// leading and trailing whitespace of a property does not survive the trip.
pub fn scan(html: &str, roots: &[&str]) -> Result<Vec<MicroformatBlock>> {
  let mut reader = Reader::from_str(html);
  let config = reader.config_mut();
  config.trim_text(true);
  config.check_end_names = false;

  let mut blocks = Vec::new();
  let mut current: Option<MicroformatBlock> = None;
  let mut property: Option<PendingProperty> = None;
  let mut depth = 0usize;

  loop {
    match reader.read_event().map_err(markup)? {
      Event::Start(e) => {
        if current.is_none() {
          if let Some(class) = root_class(&e, roots)? {
            current = Some(MicroformatBlock {
              class,
              properties: Vec::new(),
            });
            depth = 1;
          }
        } else {
          depth += 1;
          if property.is_none()
            && let Some(class) = first_class(&e)?
          {
            property = Some(PendingProperty {
              class,
              title: attribute(&e, "title")?,
              text: String::new(),
              depth,
            });
          }
        }
      }
      Event::Empty(e) => {
        if property.is_none()
          && let Some(block) = current.as_mut()
          && let Some(class) = first_class(&e)?
        {
          let value = attribute(&e, "title")?.unwrap_or_default();
          block.properties.push((class, value));
        }
      }
      Event::Text(t) => {
        if let Some(p) = property.as_mut() {
          p.text.push_str(&t.unescape().map_err(markup)?);
        }
      }
      Event::End(_) => {
        if let Some(block) = current.as_mut() {
          if let Some(p) = property.take_if(|p| p.depth == depth) {
            block.properties.push(p.finish());
          }
          depth -= 1;
          if depth == 0 {
            blocks.extend(current.take());
          }
        }
      }
      Event::Eof => break,
      _ => {}
    }
  }

  if let Some(mut block) = current {
    if let Some(p) = property {
      block.properties.push(p.finish());
    }
    blocks.push(block);
  }

  Ok(blocks)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample(page: &HtmlPage) -> String {
    let mut w = MicroformatWriter::new("vcalendar_export", page).unwrap();
    w.open("vevent").unwrap();
    w.div("summary", "Fish & chips <late>").unwrap();
    w.abbr("dtstart", "20221201T100000", "2022-12-01 10:00:00")
      .unwrap();
    w.div("location", "").unwrap();
    w.close().unwrap();
    w.finish().unwrap()
  }

  #[test]
  fn fragment_starts_with_marker() {
    let out = sample(&HtmlPage::fragment());
    assert!(out.starts_with("<!--vcalendar_export-->\n"), "got:\n{out}");
    assert!(!out.contains("<!DOCTYPE"));
    assert!(out.contains(r#"<div class="vevent">"#));
    assert!(out.contains("Fish &amp; chips &lt;late&gt;"), "got:\n{out}");
    assert!(
      out.contains(r#"<div class="location"></div>"#),
      "got:\n{out}"
    );
  }

  #[test]
  fn complete_page_wraps_blocks() {
    let out = sample(&HtmlPage::complete("en", "My Calendar"));
    assert!(out.starts_with("<!--vcalendar_export-->\n<!DOCTYPE html>"));
    assert!(out.contains(r#"<html lang="en">"#));
    assert!(out.contains("<title>My Calendar</title>"));
    assert!(out.trim_end().ends_with("</html>"), "got:\n{out}");
  }

  #[test]
  fn scan_reads_back_written_blocks() {
    for page in [HtmlPage::fragment(), HtmlPage::complete("fr", "t")] {
      let blocks = scan(&sample(&page), &["vevent", "vtodo"]).unwrap();
      assert_eq!(blocks.len(), 1);
      let b = &blocks[0];
      assert_eq!(b.class, "vevent");
      assert_eq!(b.get("summary"), Some("Fish & chips <late>"));
      assert_eq!(b.get("dtstart"), Some("20221201T100000"));
      assert_eq!(b.get("location"), Some(""));
      assert_eq!(b.get("status"), None);
    }
  }

  #[test]
  fn scan_ignores_layout_and_unrelated_markup() {
    let html = r#"<section><p class="intro">hello</p>
      <div class="vcard extra"><div
        class="fn">Alice</div><span class="tel">1</span>
        <div class="tel"><b>2</b></div><br class="email" title="a@b.c"/></div>
      </section>"#;
    let blocks = scan(html, &["vcard"]).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].get("fn"), Some("Alice"));
    assert_eq!(blocks[0].all("tel").collect::<Vec<_>>(), ["1", "2"]);
    assert_eq!(blocks[0].get("email"), Some("a@b.c"));
  }

  #[test]
  fn scan_keeps_truncated_block() {
    let html = r#"<div class="vtodo"><div class="summary">Buy milk</div>"#;
    let blocks = scan(html, &["vtodo"]).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].get("summary"), Some("Buy milk"));
  }

  #[test]
  fn scan_trims_values() {
    let html = r#"<div class="vevent"><div class="location">  Room 4 </div></div>"#;
    let blocks = scan(html, &["vevent"]).unwrap();
    assert_eq!(blocks[0].get("location"), Some("Room 4"));
  }
}
