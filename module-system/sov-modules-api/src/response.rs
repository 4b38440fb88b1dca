/// Response type for the `Module::call` method. Events are not part of the
/// response; they are recorded in the working set.
#[derive(Default, Debug, PartialEq, Eq)]
pub struct CallResponse {}
