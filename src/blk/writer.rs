//! Zeilenorientierter Writer für das Block-Format der Visier-Dateien.

use super::value::BlkValue;

const INDENT: &str = "  ";

/// Sammelt Zeilen (Kommentare, Skalare, Blöcke) mit Einrückung je Ebene.
#[derive(Debug, Default)]
pub struct BlkWriter {
    lines: Vec<String>,
    depth: usize,
}

impl BlkWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, text: String) {
        let mut line = INDENT.repeat(self.depth);
        line.push_str(&text);
        self.lines.push(line);
    }

    /// `// text`
    pub fn comment(&mut self, text: &str) {
        self.push(format!("// {}", text));
    }

    /// `//-- name`, kennzeichnet das folgende Element.
    ///
    /// Ein Zeilenumbruch im Namen beendet den Kommentar vorzeitig.
    pub fn marker(&mut self, name: &str) {
        self.push(format!("//-- {}", name));
    }

    /// `key:tag = value`
    pub fn scalar(&mut self, key: &str, value: impl Into<BlkValue>) {
        let value = value.into();
        self.push(format!("{}:{} = {}", key, value.tag(), value.render()));
    }

    /// Leerzeile zwischen Abschnitten
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// `name {`
    pub fn open(&mut self, name: &str) {
        self.push(format!("{} {{", name));
        self.depth += 1;
    }

    /// `}`
    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.push("}".to_string());
    }

    /// Schreibt einen Block und schließt ihn nach `body`.
    pub fn block(&mut self, name: &str, body: impl FnOnce(&mut Self)) {
        self.open(name);
        body(self);
        self.close();
    }

    /// Zusätzliche Einrückungsebene ohne eigenen Block.
    pub fn indented(&mut self, body: impl FnOnce(&mut Self)) {
        self.depth += 1;
        body(self);
        self.depth = self.depth.saturating_sub(1);
    }

    /// Einzeiliger Block: `name { k:tag=v; k:tag=v; }`
    pub fn inline_block(&mut self, name: &str, fields: &[(&str, BlkValue)]) {
        let body: String = fields
            .iter()
            .map(|(key, value)| format!(" {}:{}={};", key, value.tag(), value.render()))
            .collect();
        self.push(format!("{} {{{} }}", name, body));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Gesamter Text, jede Zeile mit `\n` abgeschlossen.
    pub fn finish(self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in self.lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}
