use lunar_core::PaletteIndex;

use crate::language::word_set;
use crate::{LanguageDefinition, Tokenizer};

const PURPLE_KEYWORDS: &[&str] = &[
    "break", "do", "else", "elseif", "end", "for", "function", "if", "in", "repeat", "return",
    "then", "until", "while",
];

const BLUE_KEYWORDS: &[&str] = &["false", "true", "local", "nil", "not", "or"];

const KNOWN_FUNCTIONS: &[&str] = &[
    // base library
    "assert", "collectgarbage", "dofile", "error", "getmetatable", "ipairs", "loadfile", "load",
    "loadstring", "next", "pairs", "pcall", "print", "rawequal", "rawlen", "rawget", "rawset",
    "select", "setmetatable", "tonumber", "tostring", "type", "xpcall", "_G", "_VERSION",
    // bit32
    "arshift", "band", "bnot", "bor", "bxor", "btest", "extract", "lrotate", "lshift", "replace",
    "rrotate", "rshift",
    // coroutine
    "create", "resume", "running", "status", "wrap", "yield", "isyieldable",
    // debug
    "debug", "getuservalue", "gethook", "getinfo", "getlocal", "getregistry", "getupvalue",
    "upvaluejoin", "upvalueid", "setuservalue", "sethook", "setlocal", "setupvalue", "traceback",
    // io
    "close", "flush", "input", "lines", "open", "output", "popen", "read", "tmpfile", "write",
    "seek", "setvbuf", "__gc", "__tostring",
    // math
    "abs", "acos", "asin", "atan", "ceil", "cos", "deg", "exp", "tointeger", "floor", "fmod",
    "ult", "log", "max", "min", "modf", "rad", "random", "randomseed", "sin", "sqrt", "tan",
    "atan2", "cosh", "sinh", "tanh", "pow", "frexp", "ldexp", "log10", "pi", "huge", "maxinteger",
    "mininteger",
    // package
    "loadlib", "searchpath", "seeall", "preload", "cpath", "path", "searchers", "loaded", "module",
    "require",
    // os
    "clock", "date", "difftime", "execute", "exit", "getenv", "remove", "rename", "setlocale",
    "time", "tmpname",
    // string, table, utf8
    "byte", "char", "dump", "find", "format", "gmatch", "gsub", "len", "lower", "match", "rep",
    "reverse", "sub", "upper", "pack", "packsize", "unpack", "concat", "maxn", "insert", "move",
    "sort", "offset", "codepoint", "codes", "charpattern",
    // library tables
    "coroutine", "table", "io", "os", "string", "utf8", "bit32", "math", "package",
];

impl LanguageDefinition {
    /// Lua 5.x, colored with regex rules.
    pub fn lua() -> Self {
        let rules: &[(&str, PaletteIndex)] = &[
            (r#"L?"(\\.|[^"])*""#, PaletteIndex::String),
            (r"'[^']*'", PaletteIndex::String),
            (r"0[xX][0-9a-fA-F]+[uU]?[lL]?[lL]?", PaletteIndex::Number),
            (
                r"[+-]?([0-9]+([.][0-9]*)?|[.][0-9]+)([eE][+-]?[0-9]+)?[fF]?",
                PaletteIndex::Number,
            ),
            (r"[+-]?[0-9]+[Uu]?[lL]?[lL]?", PaletteIndex::Number),
            (r"[a-zA-Z_][a-zA-Z0-9_]*", PaletteIndex::Identifier),
            (r"[\[\]{}!%^&*()\-+=~|<>?/;,.]", PaletteIndex::Punctuation),
        ];

        Self {
            name: "lua".to_string(),
            purple_keywords: word_set(PURPLE_KEYWORDS),
            blue_keywords: word_set(BLUE_KEYWORDS),
            known_functions: word_set(KNOWN_FUNCTIONS),
            comment_start: "--[[".to_string(),
            comment_end: "]]".to_string(),
            single_line_comment: "--".to_string(),
            case_sensitive: true,
            auto_indentation: false,
            tokenizer: Tokenizer::None,
            token_rules: rules
                .iter()
                .map(|(pattern, color)| (pattern.to_string(), *color))
                .collect(),
        }
    }
}
