use javelin_frontend::ast::{Block, CatchClause, Expr, ForInit, Ident, Resource, Resources, Stmt, SwitchBody, SwitchCase};
use javelin_syntax::SyntaxKind::{self, *};
use javelin_syntax::{NodeId, TextRange};

use super::Converter;
use crate::ConvertError;

impl Converter<'_> {
    pub(super) fn block(&mut self, block: &Block) -> Result<NodeId, ConvertError> {
        let mut children = Vec::new();
        for stmt in &block.stmts {
            self.stmt(stmt, &mut children)?;
        }
        self.node(BLOCK, block.range, children)
    }

    /// Pushes the nodes of `stmt`: one, or one per declarator of a local
    /// variable declaration.
    pub(super) fn stmt(&mut self, stmt: &Stmt, out: &mut Vec<NodeId>) -> Result<(), ConvertError> {
        let node = match stmt {
            Stmt::LocalVar(decl) => return self.var_decl(decl, out),
            Stmt::Block(block) => self.block(block)?,
            Stmt::LocalType(decl) => self.type_decl(decl)?,
            Stmt::Expr { range, expr } => {
                let expr = self.expr(expr)?;
                self.node(EXPRESSION_STATEMENT, *range, vec![expr])?
            }
            Stmt::If { range, cond, then, else_ } => {
                self.leading(IF_STATEMENT, *range, IF_KW)?;
                let mut children = vec![self.expr(cond)?];
                self.stmt(then, &mut children)?;
                if let Some(else_) = else_ {
                    self.stmt(else_, &mut children)?;
                }
                self.node(IF_STATEMENT, *range, children)?
            }
            Stmt::While { range, cond, body } => {
                self.leading(WHILE_STATEMENT, *range, WHILE_KW)?;
                let mut children = vec![self.expr(cond)?];
                self.stmt(body, &mut children)?;
                self.node(WHILE_STATEMENT, *range, children)?
            }
            Stmt::Do { range, body, cond } => {
                self.leading(DO_STATEMENT, *range, DO_KW)?;
                let mut children = Vec::new();
                self.stmt(body, &mut children)?;
                children.push(self.expr(cond)?);
                self.node(DO_STATEMENT, *range, children)?
            }
            Stmt::For { range, init, cond, update, body } => {
                self.leading(FOR_STATEMENT, *range, FOR_KW)?;
                let mut children = Vec::new();
                match init {
                    Some(ForInit::Decl(decl)) => {
                        let mut vars = Vec::new();
                        self.var_decl(decl, &mut vars)?;
                        children.push(self.node(FOR_INIT, decl.range, vars)?);
                    }
                    Some(ForInit::Exprs(exprs)) => children.extend(self.expr_list(FOR_INIT, exprs)?),
                    None => {}
                }
                if let Some(cond) = cond {
                    children.push(self.expr(cond)?);
                }
                children.extend(self.expr_list(FOR_UPDATE, update)?);
                self.stmt(body, &mut children)?;
                self.node(FOR_STATEMENT, *range, children)?
            }
            Stmt::ForEach { range, var, iterable, body } => {
                self.leading(FOREACH_STATEMENT, *range, FOR_KW)?;
                let mut children = Vec::new();
                self.var_decl(var, &mut children)?;
                children.push(self.expr(iterable)?);
                self.stmt(body, &mut children)?;
                self.node(FOREACH_STATEMENT, *range, children)?
            }
            Stmt::Return { range, expr } => {
                let children = expr.iter().map(|expr| self.expr(expr)).collect::<Result<_, _>>()?;
                self.node(RETURN_STATEMENT, *range, children)?
            }
            Stmt::Break { range, label } => self.jump(BREAK_STATEMENT, *range, label.as_ref())?,
            Stmt::Continue { range, label } => self.jump(CONTINUE_STATEMENT, *range, label.as_ref())?,
            Stmt::Yield { range, expr } => {
                let expr = self.expr(expr)?;
                self.node(YIELD_STATEMENT, *range, vec![expr])?
            }
            Stmt::Labeled { range, label, body } => {
                let mut children = vec![self.ident(label)?];
                self.semantic.enter_label(&label.text);
                self.stmt(body, &mut children)?;
                let node = self.node(LABELED_STATEMENT, *range, children)?;
                self.semantic.exit_label(node);
                node
            }
            Stmt::Throw { range, expr } => {
                let expr = self.expr(expr)?;
                self.node(THROW_STATEMENT, *range, vec![expr])?
            }
            Stmt::Try { range, resources, body, catches, finally } => {
                self.leading(TRY_STATEMENT, *range, TRY_KW)?;
                let mut children = Vec::new();
                if let Some(resources) = resources {
                    children.push(self.resources(resources)?);
                }
                children.push(self.block(body)?);
                for catch in catches {
                    children.push(self.catch(catch)?);
                }
                if let Some(finally) = finally {
                    children.push(self.block(finally)?);
                }
                self.node(TRY_STATEMENT, *range, children)?
            }
            Stmt::Switch { range, selector, body } => {
                self.leading(SWITCH_STATEMENT, *range, SWITCH_KW)?;
                let mut children = vec![self.expr(selector)?];
                children.extend(self.switch_body(body)?);
                self.node(SWITCH_STATEMENT, *range, children)?
            }
            Stmt::Synchronized { range, lock, body } => {
                let children = vec![self.expr(lock)?, self.block(body)?];
                self.node(SYNCHRONIZED_STATEMENT, *range, children)?
            }
            Stmt::Assert { range, cond, message } => {
                let mut children = vec![self.expr(cond)?];
                if let Some(message) = message {
                    children.push(self.expr(message)?);
                }
                self.node(ASSERT_STATEMENT, *range, children)?
            }
            Stmt::Empty { range } => self.leaf(EMPTY_STATEMENT, *range)?,
        };
        out.push(node);
        Ok(())
    }

    /// `break` or `continue`; the label resolves against the open labels.
    fn jump(&mut self, kind: SyntaxKind, range: TextRange, label: Option<&Ident>) -> Result<NodeId, ConvertError> {
        let Some(label) = label else { return self.leaf(kind, range) };
        let name = self.ident(label)?;
        self.semantic.resolve_label(&label.text, name);
        self.node(kind, range, vec![name])
    }

    /// `FOR_INIT` or `FOR_UPDATE` over a comma separated expression list.
    fn expr_list(&mut self, kind: SyntaxKind, exprs: &[Expr]) -> Result<Option<NodeId>, ConvertError> {
        let (Some(first), Some(last)) = (exprs.first(), exprs.last()) else { return Ok(None) };
        let range = TextRange::new(first.range().start(), last.range().end());
        let items = exprs.iter().map(|expr| self.expr(expr)).collect::<Result<_, _>>()?;
        self.node(kind, range, items).map(Some)
    }

    fn resources(&mut self, resources: &Resources) -> Result<NodeId, ConvertError> {
        let mut children = Vec::new();
        for resource in &resources.items {
            match resource {
                Resource::Decl(decl) => self.var_decl(decl, &mut children)?,
                Resource::Expr(expr) => children.push(self.expr(expr)?),
            }
        }
        self.node(RESOURCE_LIST, resources.range, children)
    }

    fn catch(&mut self, catch: &CatchClause) -> Result<NodeId, ConvertError> {
        let children = vec![self.param(&catch.param)?, self.block(&catch.body)?];
        self.node(CATCH_CLAUSE, catch.range, children)
    }

    /// One `CASE_GROUP` per case; the braces stay with the caller.
    pub(super) fn switch_body(&mut self, body: &SwitchBody) -> Result<Vec<NodeId>, ConvertError> {
        body.cases.iter().map(|case| self.switch_case(case)).collect()
    }

    fn switch_case(&mut self, case: &SwitchCase) -> Result<NodeId, ConvertError> {
        let mut children = Vec::new();
        for label in &case.labels {
            let mut items = label.exprs.iter().map(|expr| self.expr(expr)).collect::<Result<Vec<_>, _>>()?;
            if let Some(pattern) = &label.pattern {
                items.push(self.pattern(pattern)?);
            }
            if let Some(guard) = &label.guard {
                items.push(self.expr(guard)?);
            }
            children.push(self.node(CASE_LABEL, label.range, items)?);
        }
        for stmt in &case.body {
            self.stmt(stmt, &mut children)?;
        }
        self.node(CASE_GROUP, case.range, children)
    }
}
