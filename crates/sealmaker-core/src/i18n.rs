//! UI localization.

use serde::{Deserialize, Serialize};

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Zh,
    Fr,
}

impl Language {
    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Zh => "zh",
            Language::Fr => "fr",
        }
    }

    /// Name of the language in that language, for the language switcher.
    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Español",
            Language::Zh => "中文",
            Language::Fr => "Français",
        }
    }

    /// Parse a language code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::all()
            .iter()
            .copied()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }

    /// Languages in switcher order.
    pub fn all() -> &'static [Language] {
        &[Language::En, Language::Es, Language::Fr, Language::Zh]
    }

    /// The label dictionary for this language.
    pub fn labels(self) -> &'static Labels {
        match self {
            Language::En => &EN,
            Language::Es => &ES,
            Language::Zh => &ZH,
            Language::Fr => &FR,
        }
    }
}

/// Every display string of the UI for one language.
#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub top_text: &'static str,
    pub bottom_text: &'static str,
    pub center_text: &'static str,
    pub shape: &'static str,
    pub color: &'static str,
    pub border_width: &'static str,
    pub download: &'static str,
    pub ai_suggest: &'static str,
    pub ai_prompt_placeholder: &'static str,
    pub generating: &'static str,
    pub circle: &'static str,
    pub square: &'static str,
    pub oval: &'static str,
    pub red: &'static str,
    pub blue: &'static str,
    pub black: &'static str,
    pub green: &'static str,
    pub preview: &'static str,
    pub settings: &'static str,
    pub description_title: &'static str,
    pub seo_text: &'static str,
    pub font: &'static str,
    pub serif: &'static str,
    pub sans: &'static str,
}

impl Labels {
    /// All `(key, text)` pairs, keyed the way UI templates refer to them.
    pub fn entries(&self) -> [(&'static str, &'static str); 26] {
        [
            ("title", self.title),
            ("subtitle", self.subtitle),
            ("topText", self.top_text),
            ("bottomText", self.bottom_text),
            ("centerText", self.center_text),
            ("shape", self.shape),
            ("color", self.color),
            ("borderWidth", self.border_width),
            ("download", self.download),
            ("aiSuggest", self.ai_suggest),
            ("aiPromptPlaceholder", self.ai_prompt_placeholder),
            ("generating", self.generating),
            ("circle", self.circle),
            ("square", self.square),
            ("oval", self.oval),
            ("red", self.red),
            ("blue", self.blue),
            ("black", self.black),
            ("green", self.green),
            ("preview", self.preview),
            ("settings", self.settings),
            ("descriptionTitle", self.description_title),
            ("seoText", self.seo_text),
            ("font", self.font),
            ("serif", self.serif),
            ("sans", self.sans),
        ]
    }

    /// Look up a label by key.
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, text)| text)
    }
}

/// Current UI language plus lookup into its dictionary.
#[derive(Debug, Clone, Default)]
pub struct Localizer {
    current: Language,
}

impl Localizer {
    pub fn new(language: Language) -> Self {
        Self { current: language }
    }

    pub fn language(&self) -> Language {
        self.current
    }

    /// Switch language. Returns `true` if the language changed.
    pub fn set_language(&mut self, language: Language) -> bool {
        if self.current == language {
            return false;
        }
        log::debug!("Language changed: {} -> {}", self.current.code(), language.code());
        self.current = language;
        true
    }

    /// Labels for the current language.
    pub fn labels(&self) -> &'static Labels {
        self.current.labels()
    }

    /// Label for `key` in the current language, or the key itself if unknown.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        self.labels().get(key).unwrap_or(key)
    }
}

static EN: Labels = Labels {
    title: "Free Online Seal Maker",
    subtitle: "Create professional digital stamps in seconds.",
    top_text: "Top Text",
    bottom_text: "Bottom Text",
    center_text: "Center Text",
    shape: "Shape",
    color: "Color",
    border_width: "Border Width",
    download: "Download Seal",
    ai_suggest: "AI Suggest Content",
    ai_prompt_placeholder: "e.g., Coffee Shop, Law Firm...",
    generating: "Generating...",
    circle: "Circle",
    square: "Square",
    oval: "Oval",
    red: "Red",
    blue: "Blue",
    black: "Black",
    green: "Green",
    preview: "Preview",
    settings: "Settings",
    description_title: "About this Tool",
    seo_text: "This free online seal maker allows you to create custom digital stamps and seals without registration. Ideal for businesses, official documents, or creative projects. Features include multi-language support, high-resolution PNG export, and AI-powered text suggestions to help you design the perfect seal.",
    font: "Font Style",
    serif: "Serif",
    sans: "Sans-Serif",
};

static ES: Labels = Labels {
    title: "Creador de Sellos Online Gratis",
    subtitle: "Crea sellos digitales profesionales en segundos.",
    top_text: "Texto Superior",
    bottom_text: "Texto Inferior",
    center_text: "Texto Central",
    shape: "Forma",
    color: "Color",
    border_width: "Grosor del Borde",
    download: "Descargar Sello",
    ai_suggest: "Sugerencia IA",
    ai_prompt_placeholder: "ej., Cafetería, Bufete...",
    generating: "Generando...",
    circle: "Círculo",
    square: "Cuadrado",
    oval: "Óvalo",
    red: "Rojo",
    blue: "Azul",
    black: "Negro",
    green: "Verde",
    preview: "Vista Previa",
    settings: "Ajustes",
    description_title: "Sobre esta herramienta",
    seo_text: "Este creador de sellos en línea gratuito le permite crear sellos y timbres digitales personalizados sin registro. Ideal para empresas, documentos oficiales o proyectos creativos. Incluye soporte en varios idiomas, exportación PNG de alta resolución y sugerencias de texto impulsadas por IA.",
    font: "Estilo de Fuente",
    serif: "Serifa",
    sans: "Sans-Serif",
};

static ZH: Labels = Labels {
    title: "免费在线印章制作工具",
    subtitle: "几秒钟内创建专业的电子印章。",
    top_text: "顶部文字",
    bottom_text: "底部文字",
    center_text: "中心文字",
    shape: "形状",
    color: "颜色",
    border_width: "边框宽度",
    download: "下载印章",
    ai_suggest: "AI 智能建议",
    ai_prompt_placeholder: "例如：咖啡店、律师事务所...",
    generating: "生成中...",
    circle: "圆形",
    square: "方形",
    oval: "椭圆",
    red: "红色",
    blue: "蓝色",
    black: "黑色",
    green: "绿色",
    preview: "预览",
    settings: "设置",
    description_title: "关于本工具",
    seo_text: "这款免费的在线印章制作工具让您无需注册即可创建自定义电子印章。非常适合企业、官方文件或创意项目。功能包括多语言支持、高分辨率 PNG 导出以及 AI 驱动的文本建议，帮助您设计完美的印章。",
    font: "字体风格",
    serif: "衬线体",
    sans: "无衬线体",
};

static FR: Labels = Labels {
    title: "Créateur de Sceau en Ligne Gratuit",
    subtitle: "Créez des tampons numériques professionnels en quelques secondes.",
    top_text: "Texte Supérieur",
    bottom_text: "Texte Inférieur",
    center_text: "Texte Central",
    shape: "Forme",
    color: "Couleur",
    border_width: "Largeur de Bordure",
    download: "Télécharger",
    ai_suggest: "Suggestion IA",
    ai_prompt_placeholder: "ex., Café, Cabinet d'avocats...",
    generating: "Génération...",
    circle: "Cercle",
    square: "Carré",
    oval: "Ovale",
    red: "Rouge",
    blue: "Bleu",
    black: "Noir",
    green: "Vert",
    preview: "Aperçu",
    settings: "Paramètres",
    description_title: "À propos de cet outil",
    seo_text: "Ce créateur de sceaux en ligne gratuit vous permet de créer des tampons et sceaux numériques personnalisés sans inscription. Idéal pour les entreprises, les documents officiels ou les projets créatifs. Les fonctionnalités incluent le support multilingue, l'exportation PNG haute résolution et des suggestions de texte par IA.",
    font: "Style de Police",
    serif: "Serif",
    sans: "Sans-Serif",
};
