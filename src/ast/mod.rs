/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the syntax tree
///
/// Submodules:
/// - ast: The node arena and its parent-preserving rewiring operations
/// - node: Node ids and the closed set of node variants
/// - types: Type annotations attached to declarations
/// - json: The external record form used to compare trees
pub mod ast;
pub mod json;
pub mod node;
pub mod types;

#[cfg(test)]
mod tests;
