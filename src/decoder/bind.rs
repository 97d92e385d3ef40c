use crate::ast::{Argument, Literal, Value};
use crate::catalog::Param;
use crate::errors::DecodeError;

/// What a parameter ended up bound to.
#[derive(Debug, Clone, Copy)]
pub(super) enum Binding<'a> {
    Given(&'a Value),
    Default(&'a Literal),
}

/// Match a node's arguments against one shape's parameter list.
///
/// Works on a borrowed slice, so every candidate starts from the same
/// untouched argument list. Labeled arguments bind by name first; the
/// positional arguments then fill the unlabeled parameters in declared order.
pub(super) fn bind_arguments<'a>(
    params: &'a [Param],
    arguments: &'a [Argument],
) -> Result<Vec<Binding<'a>>, DecodeError> {
    let mut bound: Vec<Option<Binding<'a>>> = vec![None; params.len()];

    for (label, value) in arguments
        .iter()
        .filter_map(|arg| arg.label.as_deref().map(|label| (label, &arg.value)))
    {
        let Some(idx) = params
            .iter()
            .position(|p| p.label.as_deref() == Some(label))
        else {
            return Err(DecodeError::UnknownArgument(label.to_string()));
        };
        if bound[idx].is_some() {
            return Err(DecodeError::DuplicateArgument(label.to_string()));
        }
        bound[idx] = Some(Binding::Given(value));
    }

    let positional_slots: Vec<usize> = params
        .iter()
        .enumerate()
        .filter(|(_, p)| p.label.is_none())
        .map(|(i, _)| i)
        .collect();
    let positional_args: Vec<&Value> = arguments
        .iter()
        .filter(|arg| !arg.is_labeled())
        .map(|arg| &arg.value)
        .collect();
    if positional_args.len() > positional_slots.len() {
        return Err(DecodeError::TooManyArguments {
            expected: positional_slots.len(),
            found: positional_args.len(),
        });
    }
    for (slot, value) in positional_slots.iter().zip(positional_args) {
        bound[*slot] = Some(Binding::Given(value));
    }

    params
        .iter()
        .zip(bound)
        .map(|(param, slot)| {
            slot.or_else(|| param.default.as_ref().map(Binding::Default))
                .ok_or_else(|| DecodeError::MissingArgument(param.display_label().to_string()))
        })
        .collect()
}
