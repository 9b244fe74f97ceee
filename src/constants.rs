// DOM hooks the page is expected to provide.
pub const CANVAS_ID: &str = "particles";
pub const HERO_TEXT_IDS: [&str; 4] = ["heroTitle", "heroGreeting", "heroIntro", "heroSub"];

// Classes toggled on the page
pub const CANVAS_ACTIVE_CLASS: &str = "particles-active"; // hides the CSS preloader
pub const SECTION_DIMMED_CLASS: &str = "section-dimmed"; // on <body> below the hero

// Canvas data attributes
pub const CONFIG_ATTR: &str = "data-config";
pub const TIER_ATTR: &str = "data-tier";
pub const THEME_ATTR: &str = "data-theme";

// Same-origin chat proxy
pub const CHAT_ENDPOINT_PATH: &str = "/api/chat";
