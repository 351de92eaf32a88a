//! Query driver: loads a project index and answers one command against it.

use anyhow::{Context, Result, bail};
use colored::Colorize;
use lty_common::ResolverOptions;
use lty_solver::{
    ClassRef, ClassStub, IndexKey, MemoryIndex, NoSubstitution, SearchContext, SearchScope, Ty,
    TypeExpr, alias_names, ancestors, create_global_type, decode_class, encode_class, find_member,
    get_index_result_type, process_interface, process_members, process_visible_members,
    recover_alias,
};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

use crate::args::{CliArgs, Command};

/// A loaded project index with the options queries run under.
#[derive(Debug)]
pub struct Session {
    index: MemoryIndex,
    options: ResolverOptions,
    scope: SearchScope,
}

impl Session {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read project index {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("failed to parse project index {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let (index, options) = MemoryIndex::from_json(text)?;
        debug!(classes = index.len(), "loaded project index");
        Ok(Self {
            index,
            options,
            scope: SearchScope::Project,
        })
    }

    /// Apply command-line overrides on top of the project's own options.
    pub fn configure(mut self, args: &CliArgs) -> Self {
        if args.no_global_name_as_type {
            self.options = self.options.with_recognize_global_name_as_type(false);
        }
        if let Some(file) = &args.scope_file {
            self.scope = SearchScope::File(file.clone());
        }
        self
    }

    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    pub fn context(&self) -> SearchContext<'_> {
        SearchContext::for_index(&self.index, self.options).with_scope(self.scope.clone())
    }
}

// =============================================================================
// Output
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberRow {
    pub owner: String,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Output {
    Names { names: Vec<String> },
    Members { members: Vec<MemberRow> },
    Type { ty: Option<String> },
    Verdict { holds: bool },
    Alias { names: Vec<String>, recovered: String },
    Stub { hex: String, stub: ClassStub },
}

impl Output {
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            let mut text = serde_json::to_string_pretty(self)?;
            text.push('\n');
            return Ok(text);
        }
        let mut out = String::new();
        match self {
            Output::Names { names } => {
                for name in names {
                    writeln!(out, "{name}")?;
                }
            }
            Output::Members { members } => {
                for row in members {
                    writeln!(out, "{}.{}: {}", row.owner, row.name, row.ty)?;
                }
            }
            Output::Type { ty: Some(ty) } => writeln!(out, "{ty}")?,
            Output::Type { ty: None } => writeln!(out, "{}", "not found".yellow())?,
            Output::Verdict { holds: true } => writeln!(out, "{}", "yes".green().bold())?,
            Output::Verdict { holds: false } => writeln!(out, "{}", "no".red().bold())?,
            Output::Alias { names, recovered } => {
                writeln!(out, "aliases: {}", names.join(", "))?;
                writeln!(out, "recovers to: {recovered}")?;
            }
            Output::Stub { hex, stub } => {
                writeln!(out, "{hex}")?;
                let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".into());
                writeln!(out, "class: {}", field(&stub.class_name))?;
                writeln!(out, "var: {}", field(&stub.var_name))?;
                writeln!(out, "super: {}", field(&stub.super_class_name))?;
                writeln!(out, "alias: {}", field(&stub.alias_name))?;
                writeln!(out, "flags: {:#x}", stub.flags)?;
            }
        }
        Ok(out)
    }
}

// =============================================================================
// Commands
// =============================================================================

pub fn run(session: &Session, command: &Command) -> Result<Output> {
    let ctx = session.context();
    let output = match command {
        Command::Classes => Output::Names {
            names: session.index.class_names(),
        },
        Command::Supers { class } => {
            let cls = resolve(&ctx, class)?;
            Output::Names {
                names: class_names(&ancestors(&cls, &ctx)),
            }
        }
        Command::Interfaces { class } => {
            let cls = resolve(&ctx, class)?;
            let mut names = Vec::new();
            process_interface(&cls, &ctx, |iface| {
                names.push(iface.class_name().to_string());
                true
            });
            Output::Names { names }
        }
        Command::Members {
            class,
            deep,
            visible_from,
        } => {
            let cls = resolve(&ctx, class)?;
            let mut members = Vec::new();
            let mut push = |owner: &ClassRef, member: &lty_solver::MemberInfo| {
                members.push(MemberRow {
                    owner: owner.class_name().to_string(),
                    name: member.name.clone().unwrap_or_else(|| "<unnamed>".into()),
                    ty: ctx.infer(member).to_string(),
                });
            };
            match visible_from {
                Some(viewer) => {
                    let viewer = resolve(&ctx, viewer)?;
                    process_visible_members(&cls, &viewer, &ctx, &mut push);
                }
                None => process_members(&cls, &ctx, *deep, &mut push),
            }
            Output::Members { members }
        }
        Command::Member { class, name } => {
            let cls = resolve(&ctx, class)?;
            Output::Type {
                ty: find_member(&cls, name, &ctx).map(|member| ctx.infer(&member).to_string()),
            }
        }
        Command::Index { class, key } => {
            let cls = resolve(&ctx, class)?;
            Output::Type {
                ty: get_index_result_type(&cls, &parse_index_key(key), &ctx)
                    .map(|ty| ty.to_string()),
            }
        }
        Command::Subtype {
            source,
            target,
            strict,
        } => {
            let source = Ty::from_expr(&parse_type(source)?);
            let target = Ty::from_expr(&parse_type(target)?);
            Output::Verdict {
                holds: source.sub_type_of(&target, &ctx, *strict),
            }
        }
        Command::Alias { class } => {
            let cls = resolve(&ctx, class)?;
            Output::Alias {
                names: alias_names(&cls, &ctx).into_vec(),
                recovered: recover_alias(&cls, &ctx, &NoSubstitution).to_string(),
            }
        }
        Command::Global { name, store } => {
            let global = create_global_type(name, *store, session.options());
            let identities: Vec<ClassRef> = match &global {
                Ty::Union(members) => members.iter().filter_map(Ty::as_class).cloned().collect(),
                other => other.as_class().cloned().into_iter().collect(),
            };
            Output::Names {
                names: class_names(&identities),
            }
        }
        Command::Encode { class } => {
            let cls = resolve(&ctx, class)?;
            let bytes = encode_class(&cls).context("failed to encode class stub")?;
            Output::Stub {
                hex: to_hex(&bytes),
                stub: ClassStub::of(&cls),
            }
        }
        Command::Decode { hex } => {
            let bytes = from_hex(hex)?;
            let cls = decode_class(&bytes).context("invalid class stub")?;
            Output::Stub {
                hex: to_hex(&bytes),
                stub: ClassStub::of(&cls),
            }
        }
    };
    Ok(output)
}

fn resolve(ctx: &SearchContext<'_>, name: &str) -> Result<ClassRef> {
    match ctx.resolve_class(name) {
        Some(cls) => Ok(cls),
        None => bail!("class '{name}' is not declared in the project index"),
    }
}

fn class_names(classes: &[ClassRef]) -> Vec<String> {
    classes
        .iter()
        .map(|cls| cls.class_name().to_string())
        .collect()
}

fn parse_index_key(text: &str) -> IndexKey {
    let numeric_start = text
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '-');
    if numeric_start && text.parse::<f64>().is_ok() {
        IndexKey::Number(text.to_string())
    } else {
        IndexKey::String(text.to_string())
    }
}

// =============================================================================
// Type syntax
// =============================================================================

/// Parse annotation syntax into a type expression.
///
/// ```text
/// union   := postfix ('|' postfix)*
/// postfix := primary ('[]')*
/// primary := NAME ('<' union (',' union)* '>')? | '(' union ')'
/// ```
pub fn parse_type(text: &str) -> Result<TypeExpr> {
    let mut parser = TypeParser { text, pos: 0 };
    let expr = parser.union()?;
    parser.skip_ws();
    if parser.pos != text.len() {
        bail!("unexpected '{}' in type '{text}'", &text[parser.pos..]);
    }
    Ok(expr)
}

struct TypeParser<'a> {
    text: &'a str,
    pos: usize,
}

impl TypeParser<'_> {
    fn skip_ws(&mut self) {
        let rest = &self.text[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.text[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn union(&mut self) -> Result<TypeExpr> {
        let mut members = vec![self.postfix()?];
        while self.eat("|") {
            members.push(self.postfix()?);
        }
        Ok(if members.len() == 1 {
            members.remove(0)
        } else {
            TypeExpr::Union { union: members }
        })
    }

    fn postfix(&mut self) -> Result<TypeExpr> {
        let mut expr = self.primary()?;
        while self.eat("[]") {
            expr = TypeExpr::array_of(expr);
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<TypeExpr> {
        if self.eat("(") {
            let inner = self.union()?;
            if !self.eat(")") {
                bail!("missing ')' in type '{}'", self.text);
            }
            return Ok(inner);
        }
        let name = self.name()?;
        if !self.eat("<") {
            return Ok(TypeExpr::Named(name));
        }
        let mut params = vec![self.union()?];
        while self.eat(",") {
            params.push(self.union()?);
        }
        if !self.eat(">") {
            bail!("missing '>' in type '{}'", self.text);
        }
        Ok(TypeExpr::Generic { base: name, params })
    }

    fn name(&mut self) -> Result<String> {
        self.skip_ws();
        let rest = &self.text[self.pos..];
        let len = rest
            .find(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '.' | '$')))
            .unwrap_or(rest.len());
        if len == 0 {
            bail!("expected a type name at offset {} in '{}'", self.pos, self.text);
        }
        self.pos += len;
        Ok(rest[..len].to_string())
    }
}

// =============================================================================
// Hex
// =============================================================================

pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    })
}

pub fn from_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    if text.len() % 2 != 0 {
        bail!("hex stub has an odd number of digits");
    }
    (0..text.len())
        .step_by(2)
        .map(|i| {
            let digits = text
                .get(i..i + 2)
                .context("hex stub contains non-ASCII characters")?;
            u8::from_str_radix(digits, 16)
                .with_context(|| format!("invalid hex digits '{digits}' at offset {i}"))
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod tests;
