//! Template evaluation against an environment snapshot.

use super::ast::Node;
use crate::env::EnvSnapshot;
use crate::error::Result;
use crate::nix::CommandResolver;

/// Expand parsed nodes to output text.
///
/// Only the selected branch of a conditional is evaluated, so a discarded
/// branch's `$!{...}` never triggers a resolver invocation. Resolver
/// failures propagate unrecovered; everything else is infallible.
pub fn eval(nodes: &[Node], env: &EnvSnapshot, resolver: &dyn CommandResolver) -> Result<String> {
    let mut out = String::new();
    eval_into(&mut out, nodes, env, resolver)?;
    Ok(out)
}

fn eval_into(
    out: &mut String,
    nodes: &[Node],
    env: &EnvSnapshot,
    resolver: &dyn CommandResolver,
) -> Result<()> {
    for node in nodes {
        match node {
            Node::Literal(text) => out.push_str(text),
            Node::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                let branch = if env.is_set(condition) {
                    then_branch
                } else {
                    else_branch
                };
                eval_into(out, branch, env, resolver)?;
            }
            Node::VariableRef(name) => out.push_str(env.get(name).unwrap_or_default()),
            Node::PathRef(exe) => out.push_str(&resolver.resolve(exe)?),
        }
    }
    Ok(())
}
