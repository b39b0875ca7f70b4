/// AST (Abstract Syntax Tree) module
/// Contains the syntax tree produced by the parser
///
/// Submodules:
/// - ast: The syntax tree node and its construction rules
pub mod ast;
