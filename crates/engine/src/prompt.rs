use crate::Topic;
use std::fmt::Write;

/// The exact number of examples every lesson is asked to contain
pub const EXAMPLE_COUNT: usize = 5;

/// The instructional requirements for one topic
struct Template {
    /// the lesson title
    title: &'static str,
    /// the introduction the lesson must reproduce verbatim
    introduction: &'static str,
    /// the sub-topics the lesson must cover, in order
    subtopics: [&'static str; 5],
    /// suggested real-world analogies
    analogies: &'static str,
}

const OOP: Template = Template {
    title: "Orientação a Objetos",
    introduction: "No próximo passo, você vai adquirir um sólido conhecimento em orientação a \
        objetos e em boas práticas de programação com Python. Durante esse processo, você \
        compreenderá os principais conceitos do paradigma de orientação a objetos, tais como \
        classes, construtores, propriedades e diferentes tipos de métodos, bem como a integração \
        entre classes. Aprenderá a aplicar esses conceitos no seu dia a dia de programação, \
        aprimorando suas habilidades e garantindo códigos eficientes e organizados.",
    subtopics: [
        "Classes e Objetos (A base).",
        "Construtores (__init__) e self.",
        "Propriedades (Getters/Setters/@property).",
        "Métodos de Instância vs Métodos de Classe (@classmethod).",
        "Integração/Associação entre classes (Um objeto usando outro).",
    ],
    analogies: "Carro, Casa, Restaurante, Videogame, Conta Bancária",
};

const API: Template = Template {
    title: "Ambientes virtuais, arquivos e APIs",
    introduction: "Neste último passo da formação, você avançará em seus conhecimentos em Python \
        e orientação a objetos, aplicando conceitos fundamentais como herança e polimorfismo. \
        Além disso, será abordada a importância de isolar dependências e módulos por meio da \
        criação de ambientes virtuais. Você também terá a oportunidade de desenvolver sua \
        primeira API com Python!",
    subtopics: [
        "Herança (Conceito de pai/filho).",
        "Polimorfismo (Mesmo método, comportamentos diferentes).",
        "Ambientes Virtuais (venv) - Por que isolar projetos?",
        "Manipulação de Arquivos (open, with, read, write).",
        "Criação de API (Conceito de Request/Response, JSON).",
    ],
    analogies: "Herança Genética, Sala Esterilizada para venv, Arquivo como um Diário, API como \
        um Garçom",
};

fn template(topic: Topic) -> &'static Template {
    match topic {
        Topic::Oop => &OOP,
        Topic::Api => &API,
    }
}

/// The lesson title a topic's prompt asks for
pub fn title(topic: Topic) -> &'static str {
    template(topic).title
}

/// The introduction a topic's prompt requires verbatim
pub fn introduction(topic: Topic) -> &'static str {
    template(topic).introduction
}

/// Build the natural-language prompt for a topic
pub fn build(topic: Topic) -> String {
    let t = template(topic);
    let mut prompt = String::new();
    // writing to a String cannot fail
    let _ = writeln!(
        prompt,
        "Atue como um Professor Sênior de Engenharia de Software criando um material didático completo."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "TÍTULO DA AULA: \"{}\"", t.title);
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "INTRODUÇÃO OBRIGATÓRIA (Use este texto exato na introdução):"
    );
    let _ = writeln!(prompt, "\"{}\"", t.introduction);
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "CONTEÚDO TÉCNICO NECESSÁRIO (De cabo a rabo):");
    for (i, subtopic) in t.subtopics.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {subtopic}", i + 1);
    }
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "REGRAS PARA EXEMPLOS:");
    let _ = writeln!(
        prompt,
        "- Gere EXATAMENTE {EXAMPLE_COUNT} exemplos práticos e distintos."
    );
    let _ = writeln!(
        prompt,
        "- CADA exemplo deve ter uma \"Analogia da Vida Real\" muito clara (ex: {}).",
        t.analogies
    );
    let _ = writeln!(prompt, "- Os códigos devem ser didáticos e funcionais.");
    prompt
}
