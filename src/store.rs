pub(crate) mod layer_store;
