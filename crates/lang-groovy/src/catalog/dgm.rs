//! The Groovy runtime's own extension classes.
//!
//! Each entry is a helper signature, optionally followed by `| hint` naming
//! the closure shape (see [`super::ClosureHint`]'s string form).

pub(super) const DGM: &str = "org.codehaus.groovy.runtime.DefaultGroovyMethods";
pub(super) const DGSM: &str = "org.codehaus.groovy.runtime.DefaultGroovyStaticMethods";
pub(super) const STANDARD_MODULE: &str = "groovy-runtime";

pub(super) type StandardClass = (&'static str, &'static [&'static str]);

/// Instance extension classes, in registration order.
pub(super) static INSTANCE_CLASSES: &[StandardClass] = &[
    (DGM, DEFAULT_GROOVY_METHODS),
    ("org.codehaus.groovy.runtime.IOGroovyMethods", IO_GROOVY_METHODS),
    ("org.codehaus.groovy.runtime.ProcessGroovyMethods", PROCESS_GROOVY_METHODS),
    ("org.codehaus.groovy.runtime.ResourceGroovyMethods", RESOURCE_GROOVY_METHODS),
    ("org.codehaus.groovy.runtime.StringGroovyMethods", STRING_GROOVY_METHODS),
];

pub(super) static STATIC_CLASSES: &[StandardClass] = &[(DGSM, DEFAULT_GROOVY_STATIC_METHODS)];

static DEFAULT_GROOVY_METHODS: &[&str] = &[
    // object
    "static <T, U> T with(U self, Closure<T> closure) | receiver",
    "static <T, U> T with(U self, boolean returning, Closure<T> closure) | receiver",
    "static <U> U tap(U self, Closure closure) | receiver",
    "static <T> T identity(Object self, Closure<T> closure) | receiver",
    "static void addShutdownHook(Object self, Closure closure) | receiver",
    "static String dump(Object self)",
    "static String inspect(Object self)",
    "static boolean is(Object self, Object other)",
    "static void println(Object self)",
    "static void println(Object self, Object value)",
    "static void print(Object self, Object value)",
    "static void printf(Object self, String format, Object... values)",
    "static <T> T use(Object self, Class categoryClass, Closure<T> closure)",
    "static Object invokeMethod(Object object, String method, Object arguments)",
    "static MetaClass getMetaClass(Object obj)",
    "static MetaClass getMetaClass(Class c)",
    "static Map getProperties(Object self)",
    "static boolean asBoolean(Object object)",
    "static <T> T asType(Object obj, Class<T> type)",
    "static String toString(Object value)",
    "static boolean isCase(Object caseValue, Object switchValue)",
    "static boolean isCase(Collection caseValue, Object switchValue)",
    "static <T> T newInstance(Class<T> c)",
    "static <T> T newInstance(Class<T> c, Object[] args)",
    // iteration
    "static <T> T each(T self, Closure closure) | element",
    "static <T> List<T> each(List<T> self, Closure closure) | element",
    "static <T> Set<T> each(Set<T> self, Closure closure) | element",
    "static <T> Collection<T> each(Collection<T> self, Closure closure) | element",
    "static <T> Iterable<T> each(Iterable<T> self, Closure closure) | element",
    "static <T> Iterator<T> each(Iterator<T> self, Closure closure) | element",
    "static <K, V> Map<K, V> each(Map<K, V> self, Closure closure) | element",
    "static <T> T[] each(T[] self, Closure closure) | element",
    "static <T> T eachWithIndex(T self, Closure closure) | withIndex",
    "static <T> List<T> eachWithIndex(List<T> self, Closure closure) | withIndex",
    "static <T> Collection<T> eachWithIndex(Collection<T> self, Closure closure) | withIndex",
    "static <T> Iterable<T> eachWithIndex(Iterable<T> self, Closure closure) | withIndex",
    "static <K, V> Map<K, V> eachWithIndex(Map<K, V> self, Closure closure) | withIndex",
    "static <T> T[] eachWithIndex(T[] self, Closure closure) | withIndex",
    "static <T> List<T> reverseEach(List<T> self, Closure closure) | element",
    "static <K, V> Map<K, V> reverseEach(Map<K, V> self, Closure closure) | element",
    "static <T> T[] reverseEach(T[] self, Closure closure) | element",
    // transformation
    "static List collect(Object self)",
    "static <T> List<T> collect(Object self, Closure<T> transform) | element",
    "static <S, T> List<T> collect(Collection<S> self, Closure<T> transform) | element",
    "static <S, T> List<T> collect(Iterable<S> self, Closure<T> transform) | element",
    "static <S, T> List<T> collect(S[] self, Closure<T> transform) | element",
    "static <T, K, V> List<T> collect(Map<K, V> self, Closure<T> transform) | element",
    "static <S, T> Collection<T> collect(Collection<S> self, Collection<T> collector, Closure<? extends T> transform) | element",
    "static List collectNested(Collection self, Closure transform) | element",
    "static List collectNested(Iterable self, Closure transform) | element",
    "static List collectNested(Object[] self, Closure transform) | element",
    "static <T, E> List<T> collectMany(Iterable<E> self, Closure<Collection<? extends T>> projection) | element",
    "static <T, E> List<T> collectMany(E[] self, Closure<Collection<? extends T>> projection) | element",
    "static <T, K, V> List<T> collectMany(Map<K, V> self, Closure<Collection<? extends T>> projection) | element",
    "static <K, V, E> Map<K, V> collectEntries(Iterable<E> self, Closure<?> transform) | element",
    "static <K, V, E> Map<K, V> collectEntries(E[] self, Closure<?> transform) | element",
    "static <K, V, X, Y> Map<K, V> collectEntries(Map<X, Y> self, Closure<?> transform) | element",
    // searching
    "static Object find(Object self, Closure closure) | element",
    "static <T> T find(Collection<T> self, Closure closure) | element",
    "static <T> T find(T[] self, Closure condition) | element",
    "static <K, V> Map$Entry<K, V> find(Map<K, V> self, Closure<?> closure) | element",
    "static Collection findAll(Object self, Closure closure) | element",
    "static <T> Collection<T> findAll(Collection<T> self) ",
    "static <T> List<T> findAll(List<T> self, Closure condition) | element",
    "static <T> Set<T> findAll(Set<T> self, Closure condition) | element",
    "static <T> Collection<T> findAll(Collection<T> self, Closure condition) | element",
    "static <T> List<T> findAll(T[] self, Closure condition) | element",
    "static <K, V> Map<K, V> findAll(Map<K, V> self, Closure closure) | element",
    "static <T> T findResult(Object self, Closure<T> condition) | element",
    "static <T, U> T findResult(Object self, U defaultResult, Closure<T> condition) | element",
    "static <T, U> T findResult(Collection<U> self, Closure<T> condition) | element",
    "static <T, U> T findResult(Collection<U> self, T defaultResult, Closure<T> condition) | element",
    "static <T, K, V> T findResult(Map<K, V> self, Closure<T> condition) | element",
    "static <T, K, V> T findResult(Map<K, V> self, T defaultResult, Closure<T> condition) | element",
    "static <T, U> Collection<T> findResults(Iterable<U> self, Closure<T> filteringTransform) | element",
    "static <T, U> Collection<T> findResults(U[] self, Closure<T> filteringTransform) | element",
    "static <T, K, V> Collection<T> findResults(Map<K, V> self, Closure<T> filteringTransform) | element",
    "static boolean every(Object self)",
    "static boolean every(Object self, Closure predicate) | element",
    "static <T> boolean every(Iterable<T> self, Closure predicate) | element",
    "static <T> boolean every(T[] self, Closure predicate) | element",
    "static <K, V> boolean every(Map<K, V> self, Closure<?> predicate) | element",
    "static boolean any(Object self)",
    "static boolean any(Object self, Closure predicate) | element",
    "static <T> boolean any(Iterable<T> self, Closure predicate) | element",
    "static <T> boolean any(T[] self, Closure predicate) | element",
    "static <K, V> boolean any(Map<K, V> self, Closure<?> predicate) | element",
    "static <T> Collection<T> grep(Collection<T> self, Object filter)",
    "static <T> Collection<T> grep(T[] self, Object filter)",
    "static Collection grep(Object self, Object filter)",
    "static Number count(Iterable self, Object value)",
    "static <T> Number count(Iterable<T> self, Closure closure) | element",
    "static <K, V> Number count(Map<K, V> self, Closure<?> closure) | element",
    // grouping
    "static <K, T> Map<K, List<T>> groupBy(Iterable<T> self, Closure<K> closure) | element",
    "static <K, T> Map<K, List<T>> groupBy(T[] self, Closure<K> closure) | element",
    "static <G, K, V> Map<G, Map<K, V>> groupBy(Map<K, V> self, Closure<G> closure) | element",
    "static <G, K, V> Map<G, List<Map$Entry<K, V>>> groupEntriesBy(Map<K, V> self, Closure<G> closure) | element",
    "static <K, E> Map<K, Integer> countBy(Iterable<E> self, Closure<K> closure) | element",
    "static <K, E> Map<K, Integer> countBy(E[] self, Closure<K> closure) | element",
    "static <K, U, V> Map<K, Integer> countBy(Map<U, V> self, Closure<K> closure) | element",
    "static <T> Collection<Collection<T>> split(Collection<T> self, Closure closure) | element",
    "static <T> List<List<T>> split(List<T> self, Closure closure) | element",
    // folding
    "static <T> T inject(Collection<T> self, Closure closure) | inject",
    "static <E, T> T inject(Collection<E> self, T initialValue, Closure closure) | inject",
    "static <E, T> T inject(Iterator<E> self, T initialValue, Closure closure) | inject",
    "static <E, T> T inject(E[] self, T initialValue, Closure closure) | inject",
    "static <K, V, T> T inject(Map<K, V> self, T initialValue, Closure closure) | inject",
    "static <T> T inject(Object self, T initialValue, Closure closure) | inject",
    "static Object sum(Iterable self)",
    "static Object sum(Object[] self)",
    "static Object sum(Iterable self, Object initialValue)",
    "static <T> Object sum(Iterable<T> self, Closure closure) | element",
    "static String join(Iterable self, String separator)",
    "static String join(Iterator self, String separator)",
    "static String join(Object[] self, String separator)",
    "static <K, V> Map<K, V> withDefault(Map<K, V> self, Closure<V> init) | element",
    "static <T> List<T> withDefault(List<T> self, Closure<T> init) | simple:java.lang.Integer",
    // ordering
    "static <T> List<T> sort(Iterable<T> self)",
    "static <T> List<T> sort(Iterable<T> self, boolean mutate)",
    "static <T> List<T> sort(Iterable<T> self, Closure closure) | comparator",
    "static <T> List<T> sort(Iterable<T> self, boolean mutate, Closure closure) | comparator",
    "static <T> List<T> sort(Iterable<T> self, Comparator<? super T> comparator)",
    "static <T> T[] sort(T[] self)",
    "static <T> T[] sort(T[] self, Closure closure) | comparator",
    "static <K, V> Map<K, V> sort(Map<K, V> self)",
    "static <K, V> Map<K, V> sort(Map<K, V> self, Closure closure) | comparator",
    "static <T> List<T> toSorted(Iterable<T> self)",
    "static <T> List<T> toSorted(Iterable<T> self, Closure closure) | comparator",
    "static <T> List<T> toSorted(Iterable<T> self, Comparator<? super T> comparator)",
    "static <T> T[] toSorted(T[] self, Closure closure) | comparator",
    "static <K, V> Map<K, V> toSorted(Map<K, V> self, Closure closure) | comparator",
    "static <T> T max(Iterable<T> self)",
    "static <T> T max(Iterable<T> self, Closure closure) | comparator",
    "static <T> T max(Iterable<T> self, Comparator<? super T> comparator)",
    "static <T> T max(T[] self)",
    "static <K, V> Map$Entry<K, V> max(Map<K, V> self, Closure closure) | comparator",
    "static <T> T min(Iterable<T> self)",
    "static <T> T min(Iterable<T> self, Closure closure) | comparator",
    "static <T> T min(Iterable<T> self, Comparator<? super T> comparator)",
    "static <T> T min(T[] self)",
    "static <K, V> Map$Entry<K, V> min(Map<K, V> self, Closure closure) | comparator",
    "static <T> List<T> unique(List<T> self)",
    "static <T> Collection<T> unique(Collection<T> self)",
    "static <T> List<T> unique(List<T> self, Closure closure) | comparator",
    "static <T> Collection<T> unique(Collection<T> self, Closure closure) | comparator",
    "static <T> List<T> reverse(List<T> self)",
    "static <T> T[] reverse(T[] self)",
    "static <T> Iterator<T> reverse(Iterator<T> self)",
    // slicing
    "static <T> T first(List<T> self)",
    "static <T> T first(Iterable<T> self)",
    "static <T> T first(T[] self)",
    "static <T> T last(List<T> self)",
    "static <T> T last(Iterable<T> self)",
    "static <T> T last(T[] self)",
    "static <T> T head(List<T> self)",
    "static <T> T head(Iterable<T> self)",
    "static <T> List<T> tail(List<T> self)",
    "static <T> Collection<T> tail(Iterable<T> self)",
    "static <T> List<T> init(List<T> self)",
    "static <T> List<T> take(List<T> self, int num)",
    "static <T> Collection<T> take(Iterable<T> self, int num)",
    "static <K, V> Map<K, V> take(Map<K, V> self, int num)",
    "static <T> List<T> drop(List<T> self, int num)",
    "static <T> Collection<T> drop(Iterable<T> self, int num)",
    "static <K, V> Map<K, V> drop(Map<K, V> self, int num)",
    "static <T> List<T> takeWhile(List<T> self, Closure condition) | element",
    "static <T> List<T> dropWhile(List<T> self, Closure condition) | element",
    "static List flatten(List self)",
    "static Collection flatten(Collection self)",
    "static <K, V> Map<K, V> subMap(Map<K, V> map, Collection<K> keys)",
    "static <K, V> V get(Map<K, V> map, K key, V defaultValue)",
    // conversion
    "static <T> List<T> toList(Iterable<T> self)",
    "static <T> List<T> toList(Iterator<T> self)",
    "static <T> List<T> toList(T[] array)",
    "static <T> Set<T> toSet(Iterable<T> self)",
    "static <T> List<T> asList(Iterable<T> self)",
    "static <T> List<T> asImmutable(List<T> self)",
    "static <T> Set<T> asImmutable(Set<T> self)",
    "static <K, V> Map<K, V> asImmutable(Map<K, V> self)",
    "static int size(Object[] self)",
    "static int size(Iterator self)",
    "static int size(Iterable self)",
    "static boolean contains(Object[] self, Object value)",
    "static boolean contains(Iterable self, Object item)",
    "static <T> Iterator<T> iterator(T[] a)",
    "static Iterator iterator(Object o)",
    // indexing
    "static <T> T getAt(List<T> self, int idx)",
    "static <T> T getAt(List<T> self, Number idx)",
    "static <T> List<T> getAt(List<T> self, Range range)",
    "static <T> List<T> getAt(List<T> self, Collection indices)",
    "static <K, V> V getAt(Map<K, V> self, Object key)",
    "static <T> T getAt(Iterable<T> self, int idx)",
    "static <T> T getAt(Iterator<T> self, int idx)",
    "static <T> List<T> getAt(T[] array, Range range)",
    "static Object getAt(Object self, String property)",
    "static <T> void putAt(List<T> self, int idx, T value)",
    "static <K, V> V putAt(Map<K, V> self, K key, V value)",
    "static void putAt(Object self, String property, Object newValue)",
    // operators
    "static <T> List<T> plus(List<T> left, Collection<T> right)",
    "static <T> List<T> plus(List<T> left, T right)",
    "static <T> Collection<T> plus(Collection<T> left, Collection<T> right)",
    "static <T> Collection<T> plus(Collection<T> left, T right)",
    "static <K, V> Map<K, V> plus(Map<K, V> left, Map<K, V> right)",
    "static <T> List<T> minus(List<T> self, Collection<?> removeMe)",
    "static <T> List<T> minus(List<T> self, Object removeMe)",
    "static <K, V> Map<K, V> minus(Map<K, V> self, Map removeMe)",
    "static <T> List<T> multiply(List<T> self, Number factor)",
    "static <T> List<T> leftShift(List<T> self, T value)",
    "static <T> Collection<T> leftShift(Collection<T> self, T value)",
    "static <K, V> Map<K, V> leftShift(Map<K, V> self, Map$Entry<K, V> entry)",
    "static <K, V> Map<K, V> leftShift(Map<K, V> self, Map<K, V> other)",
    "static Number plus(Number left, Number right)",
    "static Number minus(Number left, Number right)",
    "static Number multiply(Number left, Number right)",
    "static Number div(Number left, Number right)",
    "static Number power(Number self, Number exponent)",
    "static Number mod(Number left, Number right)",
    "static Number leftShift(Number self, Number operand)",
    "static Number rightShift(Number self, Number operand)",
    "static Boolean and(Boolean left, Boolean right)",
    "static Boolean or(Boolean left, Boolean right)",
    "static Boolean xor(Boolean left, Boolean right)",
    // numbers
    "static void times(Number self, Closure closure) | simple:java.lang.Integer",
    "static void upto(Number self, Number to, Closure closure) | firstParam",
    "static void downto(Number self, Number to, Closure closure) | firstParam",
    "static void step(Number self, Number to, Number stepNumber, Closure closure) | firstParam",
    "static Number abs(Number number)",
    "static Integer toInteger(Number self)",
    "static Long toLong(Number self)",
    "static Double toDouble(Number self)",
    "static BigDecimal toBigDecimal(Number self)",
    "static BigInteger toBigInteger(Number self)",
];

static IO_GROOVY_METHODS: &[&str] = &[
    "static <T> T eachLine(InputStream stream, Closure<T> closure) | simple:java.lang.String",
    "static <T> T eachLine(InputStream stream, String charset, Closure<T> closure) | simple:java.lang.String",
    "static <T> T eachLine(Reader self, Closure<T> closure) | simple:java.lang.String",
    "static <T> T eachLine(Reader self, int firstLine, Closure<T> closure) | simple:java.lang.String",
    "static String getText(InputStream is)",
    "static String getText(Reader reader)",
    "static String getText(BufferedReader reader)",
    "static List<String> readLines(InputStream stream)",
    "static List<String> readLines(Reader reader)",
    "static String readLine(Reader self)",
    "static <T> T withReader(Reader reader, Closure<T> closure) | firstParam",
    "static <T> T withReader(InputStream in, Closure<T> closure) | simple:java.io.Reader",
    "static <T> T withWriter(Writer writer, Closure<T> closure) | firstParam",
    "static <T> T withWriter(OutputStream stream, Closure<T> closure) | simple:java.io.Writer",
    "static <T> T withStream(InputStream stream, Closure<T> closure) | firstParam",
    "static <T> T withStream(OutputStream os, Closure<T> closure) | firstParam",
    "static <T> T withPrintWriter(Writer writer, Closure<T> closure) | simple:java.io.PrintWriter",
    "static <T> T withPrintWriter(OutputStream stream, Closure<T> closure) | simple:java.io.PrintWriter",
    "static <T, U extends Closeable> T withCloseable(U self, Closure<T> action) | firstParam",
    "static Writer leftShift(Writer self, Object value)",
    "static Writer leftShift(OutputStream self, Object value)",
    "static OutputStream leftShift(OutputStream self, InputStream in)",
    "static OutputStream leftShift(OutputStream self, byte[] value)",
    "static void filterLine(Reader reader, Writer writer, Closure closure) | simple:java.lang.String",
    "static Writable filterLine(Reader reader, Closure closure) | simple:java.lang.String",
    "static void filterLine(InputStream self, Writer writer, Closure predicate) | simple:java.lang.String",
    "static Writable filterLine(InputStream self, Closure predicate) | simple:java.lang.String",
    "static void transformChar(Reader self, Writer writer, Closure closure) | simple:java.lang.String",
    "static void transformLine(Reader reader, Writer writer, Closure closure) | simple:java.lang.String",
    "static <T> T splitEachLine(Reader self, String regex, Closure<T> closure) | simple:java.util.List<java.lang.String>",
    "static <T> T splitEachLine(InputStream stream, String regex, Closure<T> closure) | simple:java.util.List<java.lang.String>",
    "static Iterator<String> iterator(Reader self)",
    "static Iterator<Byte> iterator(InputStream self)",
    "static void eachByte(InputStream is, Closure closure) | simple:java.lang.Byte",
    "static byte[] getBytes(InputStream is)",
    "static BufferedReader newReader(InputStream self)",
    "static BufferedWriter newWriter(OutputStream stream)",
    "static PrintWriter newPrintWriter(Writer writer)",
    "static PrintWriter newPrintWriter(OutputStream stream)",
];

static PROCESS_GROOVY_METHODS: &[&str] = &[
    "static String getText(Process self)",
    "static InputStream getIn(Process self)",
    "static InputStream getErr(Process self)",
    "static OutputStream getOut(Process self)",
    "static void waitForOrKill(Process self, long numberOfMillis)",
    "static void consumeProcessOutput(Process self)",
    "static void consumeProcessOutput(Process self, Appendable output, Appendable error)",
    "static Process execute(String self)",
    "static Process execute(String self, String[] envp, File dir)",
    "static Process execute(String[] commandArray)",
    "static Process execute(List commands)",
    "static Writer leftShift(Process self, Object value)",
    "static OutputStream leftShift(Process self, byte[] value)",
    "static void withWriter(Process self, Closure closure) | simple:java.io.Writer",
    "static void withOutputStream(Process self, Closure closure) | simple:java.io.OutputStream",
    "static Process or(Process left, Process right)",
    "static Process pipeTo(Process left, Process right)",
];

static RESOURCE_GROOVY_METHODS: &[&str] = &[
    "static <T> T eachLine(File self, Closure<T> closure) | simple:java.lang.String",
    "static <T> T eachLine(File self, int firstLine, Closure<T> closure) | simple:java.lang.String",
    "static <T> T eachLine(File self, String charset, Closure<T> closure) | simple:java.lang.String",
    "static <T> T eachLine(URL url, Closure<T> closure) | simple:java.lang.String",
    "static String getText(File file)",
    "static String getText(File file, String charset)",
    "static String getText(URL url)",
    "static String getText(URL url, String charset)",
    "static void setText(File file, String text)",
    "static byte[] getBytes(File file)",
    "static byte[] getBytes(URL url)",
    "static void setBytes(File file, byte[] bytes)",
    "static List<String> readLines(File file)",
    "static List<String> readLines(URL self)",
    "static void write(File file, String text)",
    "static void write(File file, String text, String charset)",
    "static void append(File file, Object text)",
    "static void append(File file, byte[] bytes)",
    "static File leftShift(File file, Object text)",
    "static File leftShift(File file, byte[] bytes)",
    "static long size(File self)",
    "static void eachFile(File self, Closure closure) | simple:java.io.File",
    "static void eachFile(File self, FileType fileType, Closure closure) | simple:java.io.File",
    "static void eachDir(File self, Closure closure) | simple:java.io.File",
    "static void eachFileRecurse(File self, Closure closure) | simple:java.io.File",
    "static void eachFileRecurse(File self, FileType fileType, Closure closure) | simple:java.io.File",
    "static void eachDirRecurse(File self, Closure closure) | simple:java.io.File",
    "static void eachFileMatch(File self, Object nameFilter, Closure closure) | simple:java.io.File",
    "static void eachFileMatch(File self, FileType fileType, Object nameFilter, Closure closure) | simple:java.io.File",
    "static void eachDirMatch(File self, Object nameFilter, Closure closure) | simple:java.io.File",
    "static void traverse(File self, Closure closure) | simple:java.io.File",
    "static void traverse(File self, Map<String, Object> options, Closure closure) | simple:java.io.File",
    "static <T> T withReader(File file, Closure<T> closure) | simple:java.io.BufferedReader",
    "static <T> T withReader(File file, String charset, Closure<T> closure) | simple:java.io.BufferedReader",
    "static <T> T withReader(URL url, Closure<T> closure) | simple:java.io.Reader",
    "static <T> T withWriter(File file, Closure<T> closure) | simple:java.io.BufferedWriter",
    "static <T> T withWriter(File file, String charset, Closure<T> closure) | simple:java.io.BufferedWriter",
    "static <T> T withWriterAppend(File file, Closure<T> closure) | simple:java.io.BufferedWriter",
    "static <T> T withWriterAppend(File file, String charset, Closure<T> closure) | simple:java.io.BufferedWriter",
    "static <T> T withPrintWriter(File file, Closure<T> closure) | simple:java.io.PrintWriter",
    "static Object withOutputStream(File file, Closure closure) | simple:java.io.OutputStream",
    "static Object withInputStream(File file, Closure closure) | simple:java.io.InputStream",
    "static <T> T withInputStream(URL url, Closure<T> closure) | simple:java.io.InputStream",
    "static <T> T withDataOutputStream(File file, Closure<T> closure) | simple:java.io.DataOutputStream",
    "static <T> T withDataInputStream(File file, Closure<T> closure) | simple:java.io.DataInputStream",
    "static <T> T splitEachLine(File self, String regex, Closure<T> closure) | simple:java.util.List<java.lang.String>",
    "static void eachByte(File self, Closure closure) | simple:java.lang.Byte",
    "static Writable filterLine(File self, Closure closure) | simple:java.lang.String",
    "static BufferedReader newReader(File file)",
    "static BufferedReader newReader(URL url)",
    "static BufferedWriter newWriter(File file)",
    "static BufferedWriter newWriter(File file, boolean append)",
    "static PrintWriter newPrintWriter(File file)",
    "static DataInputStream newDataInputStream(File file)",
    "static DataOutputStream newDataOutputStream(File file)",
    "static BufferedInputStream newInputStream(File file)",
    "static BufferedOutputStream newOutputStream(File file)",
    "static boolean deleteDir(File self)",
    "static boolean renameTo(File self, String newPathName)",
    "static Object asType(File f, Class c)",
];

static STRING_GROOVY_METHODS: &[&str] = &[
    "static <T> T eachLine(String self, Closure<T> closure) | simple:java.lang.String",
    "static <T> T eachLine(CharSequence self, Closure<T> closure) | simple:java.lang.String",
    "static <T> T eachLine(String self, int firstLine, Closure<T> closure) | simple:java.lang.String",
    "static String eachMatch(String self, String regex, Closure closure) | simple:java.lang.String",
    "static String eachMatch(String self, Pattern pattern, Closure closure) | simple:java.lang.String",
    "static <T> T splitEachLine(String self, String regex, Closure<T> closure) | simple:java.util.List<java.lang.String>",
    "static List<String> readLines(String self)",
    "static List<String> readLines(CharSequence self)",
    "static List<String> tokenize(String self)",
    "static List<String> tokenize(String self, String delimiters)",
    "static List<String> tokenize(CharSequence self, Character delimiter)",
    "static String[] split(String self)",
    "static Integer toInteger(String self)",
    "static Long toLong(String self)",
    "static Double toDouble(String self)",
    "static BigDecimal toBigDecimal(String self)",
    "static BigInteger toBigInteger(String self)",
    "static Boolean toBoolean(String self)",
    "static Character toCharacter(String self)",
    "static boolean isNumber(String self)",
    "static boolean isInteger(String self)",
    "static String capitalize(String self)",
    "static String uncapitalize(CharSequence self)",
    "static String reverse(String self)",
    "static String center(String self, Number numberOfChars)",
    "static String padLeft(String self, Number numberOfChars)",
    "static String padLeft(String self, Number numberOfChars, String padding)",
    "static String padRight(String self, Number numberOfChars)",
    "static String padRight(String self, Number numberOfChars, String padding)",
    "static String multiply(String self, Number factor)",
    "static String plus(String left, Object value)",
    "static String minus(String self, Object target)",
    "static java.lang.StringBuffer leftShift(String self, Object value)",
    "static java.lang.StringBuffer leftShift(java.lang.StringBuffer self, Object value)",
    "static StringBuilder leftShift(StringBuilder self, Object value)",
    "static String getAt(String self, int index)",
    "static String getAt(String self, Range range)",
    "static Pattern bitwiseNegate(String self)",
    "static boolean asBoolean(CharSequence string)",
    "static Object asType(String self, Class c)",
    "static String find(String self, String regex)",
    "static String find(String self, String regex, Closure closure) | simple:java.lang.String",
    "static List<String> findAll(String self, String regex)",
    "static <T> List<T> findAll(String self, String regex, Closure<T> closure) | simple:java.lang.String",
    "static String replaceAll(String self, String regex, Closure closure) | simple:java.util.List<java.lang.String>",
    "static String replaceFirst(String self, String regex, Closure closure) | simple:java.util.List<java.lang.String>",
    "static String collectReplacements(String orig, Closure<String> transform) | simple:java.lang.Character",
    "static String stripIndent(String self)",
    "static String stripMargin(String self)",
    "static String stripMargin(String self, char marginChar)",
    "static String normalize(String self)",
    "static String denormalize(String self)",
    "static String expand(String self)",
    "static String expand(String self, int tabStop)",
    "static boolean matches(String self, Pattern pattern)",
    "static String next(String self)",
    "static String previous(String self)",
    "static List<String> toList(String self)",
    "static Set<String> toSet(String self)",
    "static int size(String self)",
    "static int size(CharSequence self)",
    "static int count(String self, String text)",
];

static DEFAULT_GROOVY_STATIC_METHODS: &[&str] = &[
    "static void sleep(Object self, long milliseconds)",
    "static void sleep(Object self, long milliseconds, Closure onInterrupt) | simple:java.lang.InterruptedException",
    "static Thread start(Thread self, Closure closure)",
    "static Thread start(Thread self, String name, Closure closure)",
    "static Thread startDaemon(Thread self, Closure closure)",
    "static Thread startDaemon(Thread self, String name, Closure closure)",
    "static Date parse(Date self, String format, String input)",
    "static long currentTimeSeconds(System self)",
    "static File createTempDir(File self)",
    "static File createTempDir(File self, String prefix, String suffix)",
    "static Matcher getLastMatcher(Matcher self)",
];

/// Split `signature | hint`.
pub(super) fn split_entry(entry: &str) -> (&str, &str) {
    match entry.rsplit_once(" | ") {
        Some((signature, hint)) => (signature.trim(), hint.trim()),
        None => (entry.trim(), ""),
    }
}
