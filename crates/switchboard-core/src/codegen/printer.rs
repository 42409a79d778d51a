//! CodeWriter - 生成ファイルのバッファ
//!
//! 行単位で書き、`{` / `}` に合わせてインデントを管理します。

const INDENT: &str = "    ";

#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    depth: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在のインデントで 1 行書く
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.buf.push('\n');
            return;
        }
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// `header {` を書いて 1 段深くする
    pub fn open(&mut self, header: impl AsRef<str>) {
        self.line(format!("{} {{", header.as_ref()));
        self.depth += 1;
    }

    /// 1 段浅くして `}` + suffix を書く
    pub fn close(&mut self, suffix: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(format!("}}{suffix}"));
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// ソースのコメントを `///` doc にする（前後の空行は落とす）
    pub fn doc(&mut self, comments: &str) {
        for line in comments.trim_matches('\n').lines() {
            let line = line.trim_end();
            if line.is_empty() {
                self.line("///");
            } else if line.starts_with(' ') {
                self.line(format!("///{line}"));
            } else {
                self.line(format!("/// {line}"));
            }
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
