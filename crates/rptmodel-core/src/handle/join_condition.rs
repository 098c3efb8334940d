use crate::{handle::StructureHandle, value::Expression};

///
/// JoinConditionHandle
///
/// Typed view of a `JoinCondition` structure. Data set references come back
/// qualified with the library namespace when the target lives in a library
/// of the host.
///

#[derive(Clone, Copy, Debug)]
pub struct JoinConditionHandle<'a>(StructureHandle<'a>);

impl<'a> JoinConditionHandle<'a> {
    pub(crate) const fn new(structure: StructureHandle<'a>) -> Self {
        Self(structure)
    }

    #[must_use]
    pub const fn structure(&self) -> &StructureHandle<'a> {
        &self.0
    }

    #[must_use]
    pub fn join_type(&self) -> Option<String> {
        self.0.text("joinType")
    }

    #[must_use]
    pub fn join_operator(&self) -> Option<String> {
        self.0.text("joinOperator")
    }

    #[must_use]
    pub fn left_data_set(&self) -> Option<String> {
        self.0.text("leftDataSet")
    }

    #[must_use]
    pub fn right_data_set(&self) -> Option<String> {
        self.0.text("rightDataSet")
    }

    #[must_use]
    pub fn left_expression(&self) -> Option<Expression> {
        self.expression("leftExpression")
    }

    #[must_use]
    pub fn right_expression(&self) -> Option<Expression> {
        self.expression("rightExpression")
    }

    fn expression(&self, member: &str) -> Option<Expression> {
        self.0
            .value(member)
            .and_then(|v| v.as_expression().cloned())
    }
}
