use crate::Error;
use engine::{Lesson, Topic};
use languages::{escape, highlight};
use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
};
use tracing::info;

const STYLE: &str = "body{background:#0b1120;color:#e2e8f0;font-family:sans-serif;\
max-width:56rem;margin:auto;padding:4rem 2rem}\
.label{color:#60a5fa;font-weight:bold;text-transform:uppercase}\
.intro,.analogy{background:#1e293b;border-left:4px solid #3b82f6;padding:1rem}\
.analogy{border-color:#f59e0b}\
pre{background:#0f172a;padding:1rem;overflow-x:auto}\
.connector{text-align:center;color:#475569}\
.tok-keyword{color:#c678dd}.tok-self{color:#e06c75}.tok-decorator{color:#e5c07b}\
.tok-string{color:#98c379}.tok-comment{color:#7f848e;font-style:italic}\
.tok-class,.tok-function{color:#61afef}";

/// Render a lesson as a standalone HTML page. Every piece of lesson text is escaped and code goes
/// through the highlighter.
pub fn lesson_to_html(lesson: &Lesson) -> String {
    let mut html = String::new();
    // writing to a String cannot fail
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, "<html lang=\"pt-BR\"><head><meta charset=\"utf-8\">");
    let _ = writeln!(html, "<title>{}</title>", escape(&lesson.title));
    let _ = writeln!(html, "<style>{STYLE}</style></head><body><article>");

    let _ = writeln!(html, "<p class=\"label\">Módulo de Aprendizado</p>");
    let _ = writeln!(html, "<h1>{}</h1>", escape(&lesson.title));
    let _ = writeln!(html, "<div class=\"intro\"><p>{}</p></div>", escape(&lesson.introduction));
    let _ = writeln!(html, "<h3>Neste guia você vai aprender:</h3><ul>");
    for concept in &lesson.key_concepts {
        let _ = writeln!(html, "<li>{}</li>", escape(concept));
    }
    let _ = writeln!(html, "</ul><hr>");

    let count = lesson.examples.len();
    for (i, example) in lesson.examples.iter().enumerate() {
        let n = i + 1;
        let _ = writeln!(html, "<section id=\"exemplo-{n}\">");
        let _ = writeln!(html, "<h2>{n}. {}</h2>", escape(&example.title));
        let _ = writeln!(
            html,
            "<div class=\"analogy\"><h4>💡 Analogia Prática</h4><p>\"{}\"</p></div>",
            escape(&example.analogy)
        );
        let _ = writeln!(html, "<p>{}</p>", escape(&example.explanation));
        let _ = writeln!(html, "<p class=\"file\">exemplo_pratico_{n}.py</p>");
        let _ = writeln!(html, "<pre><code>{}</code></pre>", highlight(&example.code));
        let _ = writeln!(html, "</section>");
        if n < count {
            let _ = writeln!(html, "<div class=\"connector\">↓</div>");
        }
    }

    let _ = writeln!(html, "<footer><h3>Módulo Concluído</h3>");
    let _ = writeln!(html, "<p>Você revisou todos os conceitos desta seção.</p></footer>");
    let _ = writeln!(html, "</article></body></html>");
    html
}

/// Write the lesson page for `topic` into `dir` and return its path
pub fn export(dir: &Path, topic: Topic, lesson: &Lesson) -> Result<PathBuf, Error> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.html", topic.id()));
    std::fs::write(&path, lesson_to_html(lesson))?;
    info!("Exported {} lesson to {}", topic, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Example;

    fn lesson() -> Lesson {
        Lesson {
            title: "Classes & <Objetos>".to_string(),
            introduction: "Intro".to_string(),
            key_concepts: vec!["Primeiro".to_string(), "Segundo".to_string()],
            examples: (1..=3)
                .map(|i| Example {
                    title: format!("Exemplo {i}"),
                    analogy: format!("Analogia {i}"),
                    code: format!("class C{i}:\n    pass"),
                    explanation: format!("Explicação {i}"),
                })
                .collect(),
        }
    }

    #[test]
    fn test_text_is_escaped() {
        let html = lesson_to_html(&lesson());
        assert!(html.contains("<h1>Classes &amp; &lt;Objetos&gt;</h1>"));
        assert!(!html.contains("<Objetos>"));
    }

    #[test]
    fn test_sections_in_order() {
        let html = lesson_to_html(&lesson());
        let first = html.find("Primeiro").unwrap();
        let second = html.find("Segundo").unwrap();
        assert!(first < second);

        let positions = (1..=3)
            .map(|i| html.find(&format!("<h2>{i}. Exemplo {i}</h2>")).unwrap())
            .collect::<Vec<_>>();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(html.contains("exemplo_pratico_3.py"));
        assert_eq!(html.matches("class=\"connector\"").count(), 2);
        assert!(html.find("Módulo Concluído").unwrap() > positions[2]);
    }

    #[test]
    fn test_code_is_highlighted() {
        let html = lesson_to_html(&lesson());
        assert!(html.contains("<span class=\"tok-keyword\">class</span>"));
        assert!(html.contains("<span class=\"tok-class\">C1</span>"));
    }

    #[test]
    fn test_export_writes_topic_file() {
        let dir = std::env::temp_dir().join(format!("pyguide-export-{}", std::process::id()));
        let path = export(&dir, Topic::Api, &lesson()).unwrap();
        assert_eq!(path, dir.join("api.html"));
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
