use pretty_assertions::assert_eq;
use rstest::rstest;
use starknet_hash::address::{compute_address, CONTRACT_ADDRESS_PREFIX, L2_ADDRESS_UPPER_BOUND};
use starknet_hash::crypto::hash_sequence;
use starknet_hash::transaction_hash::INVOKE_PREFIX;
use starknet_hash::{AddressParams, ClassHash, ContractDefinition, ContractHasher, FieldElement};

use crate::common::{
    felt, init_logging, load_artifact, FailingCompiler, StaticCompiler, BALANCE_CLASS_HASH,
    BALANCE_WITH_IMPORTS_CLASS_HASH, COUNTER_CLASS_HASH,
};

#[rstest]
#[case::balance(
    BALANCE_CLASS_HASH,
    vec!["21", "37"],
    "3316580593564723859317820329637657156309457332674023938311570757658456768228"
)]
#[case::balance_with_imports(
    BALANCE_WITH_IMPORTS_CLASS_HASH,
    vec![],
    "3071578545310652849530946601977241514019750671546015132445945458958079023834"
)]
fn test_address_from_known_class_hash(
    #[from(init_logging)] _logging: (),
    #[case] class_hash: &str,
    #[case] constructor_args: Vec<&str>,
    #[case] expected: &str,
) {
    let hasher = ContractHasher::new(FailingCompiler);
    let params = AddressParams {
        class_hash: Some(ClassHash(felt(class_hash))),
        ..AddressParams::new(felt("1111"), constructor_args.into_iter().map(felt).collect())
    };

    let address = hasher.compute_address(&ContractDefinition::default(), &params).unwrap();
    assert_eq!(*address, felt(expected));
}

#[rstest]
fn test_address_from_compiled_contract(#[from(init_logging)] _logging: ()) {
    let hasher = ContractHasher::new(FailingCompiler);
    let definition = ContractDefinition::from_compiled(load_artifact("counter_compiled.json"));
    let params = AddressParams::new(felt("42"), vec![felt("5")]);

    let address = hasher.compute_address(&definition, &params).unwrap();
    let expected =
        compute_address(&ClassHash(felt(COUNTER_CLASS_HASH)), &FieldElement::ZERO, &felt("42"), &[felt("5")]);
    assert_eq!(address, expected);
}

#[test]
fn test_address_from_source_matches_compiled() {
    let params = AddressParams::new(felt("42"), vec![felt("5")]);
    let from_compiled = ContractHasher::new(FailingCompiler)
        .compute_address(&ContractDefinition::from_compiled(load_artifact("counter_compiled.json")), &params)
        .unwrap();
    let from_source = ContractHasher::new(StaticCompiler { artifact: load_artifact("counter_compiled.json") })
        .compute_address(&ContractDefinition::from_source("%lang starknet"), &params)
        .unwrap();

    assert_eq!(from_compiled, from_source);
}

#[test]
fn test_deployer_address_changes_the_address() {
    let hasher = ContractHasher::new(FailingCompiler);
    let definition = ContractDefinition::from_compiled(load_artifact("counter_compiled.json"));
    let direct = AddressParams::new(felt("42"), vec![]);
    let through_deployer = AddressParams { deployer_address: felt("0x1234"), ..direct.clone() };

    assert_ne!(
        hasher.compute_address(&definition, &direct).unwrap(),
        hasher.compute_address(&definition, &through_deployer).unwrap()
    );
}

#[test]
fn test_addresses_stay_below_the_upper_bound() {
    for salt in 0u64..16 {
        let address =
            compute_address(&ClassHash(felt(COUNTER_CLASS_HASH)), &FieldElement::ZERO, &FieldElement::from(salt), &[]);
        assert!(address.to_biguint() < *L2_ADDRESS_UPPER_BOUND);
    }
}

#[rstest]
#[case::with_constructor_args(vec!["21", "37"])]
#[case::without_constructor_args(vec![])]
fn test_address_and_invoke_domains_are_separate(#[case] constructor_args: Vec<&str>) {
    let class_hash = ClassHash(felt(COUNTER_CLASS_HASH));
    let salt = felt("1111");
    let args: Vec<FieldElement> = constructor_args.into_iter().map(felt).collect();
    let tail = [FieldElement::ZERO, salt, *class_hash, hash_sequence(&args)];
    let under_prefix = |prefix: FieldElement| hash_sequence(&[prefix, tail[0], tail[1], tail[2], tail[3]]);

    assert_ne!(under_prefix(CONTRACT_ADDRESS_PREFIX), under_prefix(INVOKE_PREFIX));
    assert_ne!(*compute_address(&class_hash, &FieldElement::ZERO, &salt, &args), under_prefix(INVOKE_PREFIX));
}
