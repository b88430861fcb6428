//! AST Visitor pattern.
//!
//! # Usage
//!
//! Implement `Visitor` for your struct. Override `visit_*` methods to add logic.
//! Call `walk_*` within your override to continue recursion (or omit it to stop).
//!
//! ```ignore
//! impl<'a> Visitor<'a> for MyPass {
//!     fn visit_statement(&mut self, stmt: &'a Statement) {
//!         // Pre-order logic
//!         walk_statement(self, stmt);
//!         // Post-order logic
//!     }
//! }
//! ```
//!
//! The lifetime lets passes keep references into the program they walk.

use jolie_core::{
    CorrelationSetInfo, CourierDefinition, Declaration, DefinitionNode, EmbeddedServiceNode,
    ExecutionInfo, Expression, InlineTreeOperation, InputPortInfo, InterfaceDefinition,
    OperationDeclaration, OutputPortInfo, Program, Statement, TypeDefinition, VariablePath,
};

pub trait Visitor<'a>: Sized {
    fn visit_program(&mut self, program: &'a Program) {
        walk_program(self, program);
    }

    fn visit_declaration(&mut self, decl: &'a Declaration) {
        walk_declaration(self, decl);
    }

    fn visit_type_definition(&mut self, def: &'a TypeDefinition) {
        walk_type_definition(self, def);
    }

    fn visit_interface(&mut self, _interface: &'a InterfaceDefinition) {
        // Operations are visited through the ports that expose them
    }

    fn visit_input_port(&mut self, port: &'a InputPortInfo) {
        walk_input_port(self, port);
    }

    fn visit_output_port(&mut self, port: &'a OutputPortInfo) {
        walk_output_port(self, port);
    }

    fn visit_operation_declaration(&mut self, _op: &'a OperationDeclaration) {
        // Leaf node
    }

    fn visit_execution(&mut self, _info: &'a ExecutionInfo) {
        // Leaf node
    }

    fn visit_correlation_set(&mut self, _cset: &'a CorrelationSetInfo) {
        // Leaf node
    }

    fn visit_procedure(&mut self, def: &'a DefinitionNode) {
        walk_procedure(self, def);
    }

    fn visit_courier(&mut self, courier: &'a CourierDefinition) {
        walk_courier(self, courier);
    }

    fn visit_embedded_service(&mut self, _service: &'a EmbeddedServiceNode) {
        // Leaf node
    }

    fn visit_statement(&mut self, stmt: &'a Statement) {
        walk_statement(self, stmt);
    }

    fn visit_expression(&mut self, expr: &'a Expression) {
        walk_expression(self, expr);
    }

    fn visit_variable_path(&mut self, path: &'a VariablePath) {
        walk_variable_path(self, path);
    }
}

pub fn walk_program<'a, V: Visitor<'a>>(visitor: &mut V, program: &'a Program) {
    for decl in &program.children {
        visitor.visit_declaration(decl);
    }
}

pub fn walk_declaration<'a, V: Visitor<'a>>(visitor: &mut V, decl: &'a Declaration) {
    match decl {
        Declaration::Type(def) => visitor.visit_type_definition(def),
        Declaration::Interface(interface) => visitor.visit_interface(interface),
        Declaration::InputPort(port) => visitor.visit_input_port(port),
        Declaration::OutputPort(port) => visitor.visit_output_port(port),
        Declaration::Execution(info) => visitor.visit_execution(info),
        Declaration::CorrelationSet(cset) => visitor.visit_correlation_set(cset),
        Declaration::Procedure(def) => visitor.visit_procedure(def),
        Declaration::Courier(courier) => visitor.visit_courier(courier),
        Declaration::EmbeddedService(service) => visitor.visit_embedded_service(service),
    }
}

pub fn walk_type_definition<'a, V: Visitor<'a>>(visitor: &mut V, def: &'a TypeDefinition) {
    match def {
        TypeDefinition::Inline(inline) => {
            for (_, sub) in inline.sub_types() {
                visitor.visit_type_definition(sub);
            }
        }
        TypeDefinition::Choice(choice) => {
            visitor.visit_type_definition(&choice.left);
            visitor.visit_type_definition(&choice.right);
        }
        TypeDefinition::Link(_) => {}
    }
}

pub fn walk_input_port<'a, V: Visitor<'a>>(visitor: &mut V, port: &'a InputPortInfo) {
    for op in port.all_operations() {
        visitor.visit_operation_declaration(op);
    }
}

pub fn walk_output_port<'a, V: Visitor<'a>>(visitor: &mut V, port: &'a OutputPortInfo) {
    for op in port.all_operations() {
        visitor.visit_operation_declaration(op);
    }
}

pub fn walk_procedure<'a, V: Visitor<'a>>(visitor: &mut V, def: &'a DefinitionNode) {
    visitor.visit_statement(&def.body);
}

pub fn walk_courier<'a, V: Visitor<'a>>(visitor: &mut V, courier: &'a CourierDefinition) {
    visitor.visit_statement(&courier.body);
}

pub fn walk_statement<'a, V: Visitor<'a>>(visitor: &mut V, stmt: &'a Statement) {
    match stmt {
        Statement::Nullprocess
        | Statement::Exit
        | Statement::CurrentHandler
        | Statement::Call(_)
        | Statement::Compensate { .. }
        | Statement::LinkIn { .. }
        | Statement::LinkOut { .. } => {}
        Statement::Sequence(children) | Statement::Parallel(children) => {
            for child in children {
                visitor.visit_statement(child);
            }
        }
        Statement::InputChoice(choice) => {
            for (guard, body) in &choice.branches {
                visitor.visit_statement(guard);
                visitor.visit_statement(body);
            }
        }
        Statement::OneWay(s) => {
            if let Some(path) = &s.input_path {
                visitor.visit_variable_path(path);
            }
        }
        Statement::RequestResponse(s) => {
            if let Some(path) = &s.input_path {
                visitor.visit_variable_path(path);
            }
            visitor.visit_statement(&s.process);
            if let Some(expr) = &s.output_expression {
                visitor.visit_expression(expr);
            }
        }
        Statement::Notification(s) => {
            if let Some(expr) = &s.output_expression {
                visitor.visit_expression(expr);
            }
        }
        Statement::SolicitResponse(s) => {
            if let Some(expr) = &s.output_expression {
                visitor.visit_expression(expr);
            }
            if let Some(path) = &s.input_path {
                visitor.visit_variable_path(path);
            }
        }
        Statement::Assign {
            path, expression, ..
        }
        | Statement::CompoundAssign {
            path, expression, ..
        } => {
            visitor.visit_variable_path(path);
            visitor.visit_expression(expression);
        }
        Statement::Pointer { left, right, .. } => {
            visitor.visit_variable_path(left);
            visitor.visit_variable_path(right);
        }
        Statement::DeepCopy { left, right, .. } => {
            visitor.visit_variable_path(left);
            visitor.visit_expression(right);
        }
        Statement::Step { path, .. } | Statement::Undef { path, .. } => {
            visitor.visit_variable_path(path);
        }
        Statement::If {
            branches,
            else_branch,
            ..
        } => {
            for (condition, body) in branches {
                visitor.visit_expression(condition);
                visitor.visit_statement(body);
            }
            if let Some(body) = else_branch {
                visitor.visit_statement(body);
            }
        }
        Statement::While {
            condition, body, ..
        } => {
            visitor.visit_expression(condition);
            visitor.visit_statement(body);
        }
        Statement::For {
            init,
            condition,
            post,
            body,
            ..
        } => {
            visitor.visit_statement(init);
            visitor.visit_expression(condition);
            visitor.visit_statement(post);
            visitor.visit_statement(body);
        }
        Statement::ForEach {
            key_path,
            target_path,
            body,
            ..
        } => {
            visitor.visit_variable_path(key_path);
            visitor.visit_variable_path(target_path);
            visitor.visit_statement(body);
        }
        Statement::Scope { body, .. } | Statement::Synchronized { body, .. } => {
            visitor.visit_statement(body);
        }
        Statement::Install(install) => {
            for (_, handler) in &install.handlers {
                visitor.visit_statement(handler);
            }
        }
        Statement::Throw { expression, .. } => {
            if let Some(expr) = expression {
                visitor.visit_expression(expr);
            }
        }
        Statement::Run { expression, .. } => visitor.visit_expression(expression),
        Statement::Spawn {
            index_path,
            upper_bound,
            in_path,
            body,
            ..
        } => {
            visitor.visit_variable_path(index_path);
            visitor.visit_expression(upper_bound);
            if let Some(path) = in_path {
                visitor.visit_variable_path(path);
            }
            visitor.visit_statement(body);
        }
        Statement::ProvideUntil { provide, until, .. } => {
            visitor.visit_statement(provide);
            visitor.visit_statement(until);
        }
        Statement::CourierChoice(choice) => {
            for branch in &choice.branches {
                visitor.visit_statement(&branch.body);
            }
        }
        Statement::NotificationForward { output_path, .. } => {
            if let Some(path) = output_path {
                visitor.visit_variable_path(path);
            }
        }
        Statement::SolicitResponseForward {
            output_path,
            input_path,
            ..
        } => {
            if let Some(path) = output_path {
                visitor.visit_variable_path(path);
            }
            if let Some(path) = input_path {
                visitor.visit_variable_path(path);
            }
        }
    }
}

pub fn walk_expression<'a, V: Visitor<'a>>(visitor: &mut V, expr: &'a Expression) {
    match expr {
        Expression::Constant(_) | Expression::Fresh | Expression::Void => {}
        Expression::Variable(path)
        | Expression::VectorSize(path)
        | Expression::IsType(path)
        | Expression::InstallFixedVariable(path) => visitor.visit_variable_path(path),
        Expression::Sum(operands) | Expression::Product(operands) => {
            for (_, operand) in operands {
                visitor.visit_expression(operand);
            }
        }
        Expression::Or(children) | Expression::And(children) => {
            for child in children {
                visitor.visit_expression(child);
            }
        }
        Expression::Not(inner) => visitor.visit_expression(inner),
        Expression::Compare { left, right, .. } => {
            visitor.visit_expression(left);
            visitor.visit_expression(right);
        }
        Expression::InstanceOf { expression, .. } | Expression::Cast { expression, .. } => {
            visitor.visit_expression(expression);
        }
        Expression::InlineTree { root, operations } => {
            visitor.visit_expression(root);
            for op in operations {
                match op {
                    InlineTreeOperation::Assign { path, expression }
                    | InlineTreeOperation::DeepCopy { path, expression } => {
                        visitor.visit_variable_path(path);
                        visitor.visit_expression(expression);
                    }
                    InlineTreeOperation::PointsTo { path, target } => {
                        visitor.visit_variable_path(path);
                        visitor.visit_variable_path(target);
                    }
                }
            }
        }
    }
}

pub fn walk_variable_path<'a, V: Visitor<'a>>(visitor: &mut V, path: &'a VariablePath) {
    for step in &path.steps {
        visitor.visit_expression(&step.key);
        if let Some(index) = &step.index {
            visitor.visit_expression(index);
        }
    }
}
