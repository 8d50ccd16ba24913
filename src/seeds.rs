//! Built-in problems that keep the workspace usable when no data file is present.

use indexmap::IndexMap;

use crate::domain::{Difficulty, Example, Problem};

fn snippets(pairs: &[(&str, &str)]) -> Option<IndexMap<String, String>> {
  Some(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
}

pub fn seed_problems() -> Vec<Problem> {
  vec![
    Problem {
      slug: "two-sum".into(),
      title: "Two Sum".into(),
      difficulty: Difficulty::Easy,
      topics: vec!["array".into(), "hash-table".into()],
      description: "Given an array of integers `nums` and an integer `target`, return indices of the two numbers such that they add up to `target`.\n\nYou may assume that each input would have **exactly one solution**.".into(),
      examples: vec![
        Example { example_num: Some(1), example_text: "Input: nums = [2,7,11,15], target = 9\nOutput: [0,1]".into() },
        Example { example_num: Some(2), example_text: "Input: nums = [3,2,4], target = 6\nOutput: [1,2]".into() },
      ],
      code_snippets: snippets(&[
        ("javascript", "/**\n * @param {number[]} nums\n * @param {number} target\n * @return {number[]}\n */\nvar twoSum = function(nums, target) {\n    \n};"),
        ("python3", "class Solution:\n    def twoSum(self, nums: List[int], target: int) -> List[int]:\n        "),
        ("cpp", "class Solution {\npublic:\n    vector<int> twoSum(vector<int>& nums, int target) {\n        \n    }\n};"),
        ("java", "class Solution {\n    public int[] twoSum(int[] nums, int target) {\n        \n    }\n}"),
      ]),
    },
    Problem {
      slug: "valid-parentheses".into(),
      title: "Valid Parentheses".into(),
      difficulty: Difficulty::Easy,
      topics: vec!["string".into(), "stack".into()],
      description: "Given a string `s` containing just the characters `'('`, `')'`, `'{'`, `'}'`, `'['` and `']'`, determine if the input string is valid.".into(),
      examples: vec![
        Example { example_num: Some(1), example_text: "Input: s = \"()\"\nOutput: true".into() },
        Example { example_num: Some(2), example_text: "Input: s = \"(]\"\nOutput: false".into() },
      ],
      code_snippets: snippets(&[
        ("python3", "class Solution:\n    def isValid(self, s: str) -> bool:\n        "),
        ("java", "class Solution {\n    public boolean isValid(String s) {\n        \n    }\n}"),
      ]),
    },
    Problem {
      slug: "median-of-two-sorted-arrays".into(),
      title: "Median of Two Sorted Arrays".into(),
      difficulty: Difficulty::Hard,
      topics: vec!["array".into(), "binary-search".into(), "divide-and-conquer".into()],
      description: "Given two sorted arrays `nums1` and `nums2` of size `m` and `n` respectively, return the median of the two sorted arrays.\n\nThe overall run time complexity should be `O(log (m+n))`.".into(),
      examples: vec![
        Example { example_num: Some(1), example_text: "Input: nums1 = [1,3], nums2 = [2]\nOutput: 2.00000".into() },
      ],
      code_snippets: snippets(&[
        ("cpp", "class Solution {\npublic:\n    double findMedianSortedArrays(vector<int>& nums1, vector<int>& nums2) {\n        \n    }\n};"),
        ("javascript", "var findMedianSortedArrays = function(nums1, nums2) {\n    \n};"),
      ]),
    },
  ]
}
